//! OnboardingService - submits the one-time preference survey.

use crate::session::SessionManager;
use advisor_core::auth::{Credentials, Identity};
use advisor_core::onboarding::{OnboardingApi, OnboardingResponse};
use advisor_core::validation::OnboardingForm;
use advisor_core::{AdvisorError, Result};
use std::sync::Arc;

/// Shown when saving preferences fails without a backend message.
pub const ONBOARDING_FALLBACK_ERROR: &str = "Failed to save preferences.";

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct OnboardingOutcome {
    pub preferences: OnboardingResponse,
    /// Identity after the refresh; `None` if the session ended meanwhile.
    pub identity: Option<Identity>,
}

pub struct OnboardingService {
    api: Arc<dyn OnboardingApi>,
    session: Arc<SessionManager>,
}

impl OnboardingService {
    pub fn new(api: Arc<dyn OnboardingApi>, session: Arc<SessionManager>) -> Self {
        Self { api, session }
    }

    /// Validates `form`, stores it and refreshes the identity so the route
    /// guard sees the completed onboarding.
    ///
    /// Local validation failures come back as `AdvisorError::Validation`
    /// without any network call.
    pub async fn submit(&self, form: OnboardingForm) -> Result<OnboardingOutcome> {
        let request = form.into_request().map_err(AdvisorError::Validation)?;
        let token = self.session.access_token();

        let preferences = self
            .api
            .submit_onboarding(token.as_ref(), &request)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Saving preferences failed"))?;
        tracing::info!(
            assets = request.assets.len(),
            investor_type = %request.investor_type,
            "Preferences saved"
        );

        let identity = self.session.refresh_identity().await;
        Ok(OnboardingOutcome {
            preferences,
            identity,
        })
    }
}
