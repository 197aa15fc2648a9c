//! Dashboard collaborator trait.

use async_trait::async_trait;

use super::model::DashboardResponse;
use crate::auth::AccessToken;
use crate::error::Result;

/// Backend endpoint serving the personalized dashboard.
///
/// Implementations must allow this call a materially longer duration than
/// other calls; the insight may be generated on demand.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /dashboard`
    async fn fetch_dashboard(&self, token: Option<&AccessToken>) -> Result<DashboardResponse>;
}
