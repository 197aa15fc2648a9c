//! AppContext - wires the client components around one backend and one
//! token store.

use crate::dashboard::DashboardLoader;
use crate::onboarding::OnboardingService;
use crate::session::SessionManager;
use crate::vote::VoteCache;
use advisor_core::Result;
use advisor_core::auth::{AuthApi, TokenStore};
use advisor_core::dashboard::DashboardApi;
use advisor_core::onboarding::OnboardingApi;
use advisor_core::vote::VoteApi;
use advisor_infrastructure::{ClientConfig, FileTokenStore};
use advisor_interaction::HttpAdvisorApi;
use std::sync::Arc;

/// Everything a front end needs, sharing a single session.
///
/// Votes, dashboard and onboarding read the bearer token from the session
/// manager; none of them touches the token store.
pub struct AppContext {
    pub session: Arc<SessionManager>,
    pub votes: Arc<VoteCache>,
    pub dashboard: Arc<DashboardLoader>,
    pub onboarding: Arc<OnboardingService>,
}

impl AppContext {
    pub fn new<A>(api: Arc<A>, store: Arc<dyn TokenStore>) -> Self
    where
        A: AuthApi + DashboardApi + VoteApi + OnboardingApi + 'static,
    {
        let session = Arc::new(SessionManager::new(api.clone(), store));
        let votes = Arc::new(VoteCache::new(api.clone(), session.clone()));
        let dashboard = Arc::new(DashboardLoader::new(api.clone(), session.clone()));
        let onboarding = Arc::new(OnboardingService::new(api, session.clone()));

        Self {
            session,
            votes,
            dashboard,
            onboarding,
        }
    }

    /// Builds the HTTP client and file-backed token store from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let api = Arc::new(HttpAdvisorApi::from_config(config));
        let store = Arc::new(FileTokenStore::with_path(config.token_path()?));
        tracing::debug!(
            base_url = api.base_url(),
            token_file = %store.path().display(),
            "[Bootstrap] Client context created"
        );
        Ok(Self::new(api, store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::SessionPhase;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_from_config_starts_signed_out_without_token_file() {
        let dir = TempDir::new().unwrap();
        let config = ClientConfig {
            token_file: Some(dir.path().join("token.json")),
            ..Default::default()
        };

        let context = AppContext::from_config(&config).unwrap();
        context.session.bootstrap().await;

        assert_eq!(context.session.phase(), SessionPhase::Unauthenticated);
    }
}
