//! Onboarding collaborator trait.

use async_trait::async_trait;

use super::model::{OnboardingRequest, OnboardingResponse};
use crate::auth::AccessToken;
use crate::error::Result;

/// Backend endpoint storing the onboarding survey answers.
#[async_trait]
pub trait OnboardingApi: Send + Sync {
    /// `POST /onboarding`
    async fn submit_onboarding(
        &self,
        token: Option<&AccessToken>,
        request: &OnboardingRequest,
    ) -> Result<OnboardingResponse>;
}
