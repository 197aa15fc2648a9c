//! Vote collaborator trait.

use async_trait::async_trait;

use super::model::{VoteCancelRequest, VoteRequest, VoteResponse};
use crate::auth::AccessToken;
use crate::error::Result;

/// Backend endpoints for casting and cancelling votes.
///
/// A missing token sends the request unauthenticated; the backend is the one
/// that enforces authentication for voting.
#[async_trait]
pub trait VoteApi: Send + Sync {
    /// `POST /vote`
    async fn cast_vote(
        &self,
        token: Option<&AccessToken>,
        request: &VoteRequest,
    ) -> Result<VoteResponse>;

    /// `DELETE /vote`
    async fn cancel_vote(
        &self,
        token: Option<&AccessToken>,
        request: &VoteCancelRequest,
    ) -> Result<VoteResponse>;
}
