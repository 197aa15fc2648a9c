//! Authentication collaborator traits.

use async_trait::async_trait;

use super::model::{AccessToken, Identity, LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::error::Result;

/// Backend endpoints for account creation, login and identity lookup.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/signup`
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse>;

    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    /// `GET /users/me` with the given bearer token.
    ///
    /// A rejected token surfaces as `AdvisorError::Unauthorized`.
    async fn fetch_identity(&self, token: &AccessToken) -> Result<Identity>;
}

/// Read-only access to the current bearer credential.
///
/// Implemented by the session owner so that other components can attach the
/// token to their requests without touching persisted storage.
pub trait Credentials: Send + Sync {
    fn access_token(&self) -> Option<AccessToken>;
}
