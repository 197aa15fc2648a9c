//! HttpAdvisorApi - REST implementation of the backend collaborator traits.
//!
//! Every authenticated call carries `Authorization: Bearer <token>` when a
//! token is supplied; without one the request goes out unauthenticated and
//! the backend decides. Responses are classified into the client's error
//! taxonomy:
//!
//! - no response (connect failure, timeout) → `AdvisorError::Transport`
//! - HTTP 401 → `AdvisorError::Unauthorized`
//! - any other non-2xx → `AdvisorError::Api` carrying the backend `detail`

use advisor_core::auth::{
    AccessToken, AuthApi, Identity, LoginRequest, LoginResponse, SignupRequest, SignupResponse,
};
use advisor_core::dashboard::{DashboardApi, DashboardResponse};
use advisor_core::onboarding::{OnboardingApi, OnboardingRequest, OnboardingResponse};
use advisor_core::vote::{VoteApi, VoteCancelRequest, VoteRequest, VoteResponse};
use advisor_core::{AdvisorError, Result};
use advisor_infrastructure::ClientConfig;
use advisor_infrastructure::config::{DEFAULT_DASHBOARD_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Backend client over HTTP.
#[derive(Clone)]
pub struct HttpAdvisorApi {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    dashboard_timeout: Duration,
}

impl HttpAdvisorApi {
    /// Creates a client for `base_url` with the default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            dashboard_timeout: Duration::from_secs(DEFAULT_DASHBOARD_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url()).with_timeouts(config.request_timeout(), config.dashboard_timeout())
    }

    /// Sets the timeout for ordinary calls and for the dashboard call.
    pub fn with_timeouts(mut self, request: Duration, dashboard: Duration) -> Self {
        self.request_timeout = request;
        self.dashboard_timeout = dashboard;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthResponse> {
        let request = self
            .client
            .get(self.url("/health"))
            .timeout(self.request_timeout);
        self.send(request, "Health check").await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(request: RequestBuilder, token: Option<&AccessToken>) -> RequestBuilder {
        match token {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, token.bearer()),
            None => request,
        }
    }

    /// Sends `request` and decodes a successful JSON body.
    ///
    /// `operation` names the call in logs and in fallback error messages.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, operation: &str) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "Request failed without a response");
            if e.is_timeout() {
                AdvisorError::transport(format!("{operation} timed out"))
            } else {
                AdvisorError::transport(format!("{operation} failed: {e}"))
            }
        })?;

        let status = response.status();
        tracing::debug!(operation, status = status.as_u16(), "Received response");

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| AdvisorError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to parse {operation} response: {e}"),
            });
        }

        // Without a readable detail the message stays empty and callers show
        // their own fallback text.
        let body = response.text().await.unwrap_or_default();
        let message = extract_detail(&body).unwrap_or_default();
        if message.is_empty() {
            tracing::warn!(
                operation,
                status = status.as_u16(),
                "Backend error without a readable detail"
            );
        }

        if status == StatusCode::UNAUTHORIZED {
            Err(AdvisorError::unauthorized(message))
        } else {
            Err(AdvisorError::api(status.as_u16(), message))
        }
    }
}

/// Pulls the human-readable `detail` string out of an error body.
///
/// Structured details (field-error lists) are not shown verbatim; callers
/// fall back to a generic message instead.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .filter(|detail| !detail.trim().is_empty())
}

#[async_trait]
impl AuthApi for HttpAdvisorApi {
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse> {
        let builder = self
            .client
            .post(self.url("/auth/signup"))
            .json(request)
            .timeout(self.request_timeout);
        self.send(builder, "Registration").await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let builder = self
            .client
            .post(self.url("/auth/login"))
            .json(request)
            .timeout(self.request_timeout);
        self.send(builder, "Login").await
    }

    async fn fetch_identity(&self, token: &AccessToken) -> Result<Identity> {
        let builder = Self::authorize(self.client.get(self.url("/users/me")), Some(token))
            .timeout(self.request_timeout);
        self.send(builder, "Identity lookup").await
    }
}

#[async_trait]
impl OnboardingApi for HttpAdvisorApi {
    async fn submit_onboarding(
        &self,
        token: Option<&AccessToken>,
        request: &OnboardingRequest,
    ) -> Result<OnboardingResponse> {
        let builder = Self::authorize(self.client.post(self.url("/onboarding")), token)
            .json(request)
            .timeout(self.request_timeout);
        self.send(builder, "Onboarding").await
    }
}

#[async_trait]
impl DashboardApi for HttpAdvisorApi {
    async fn fetch_dashboard(&self, token: Option<&AccessToken>) -> Result<DashboardResponse> {
        let builder = Self::authorize(self.client.get(self.url("/dashboard")), token)
            .timeout(self.dashboard_timeout);
        self.send(builder, "Dashboard").await
    }
}

#[async_trait]
impl VoteApi for HttpAdvisorApi {
    async fn cast_vote(
        &self,
        token: Option<&AccessToken>,
        request: &VoteRequest,
    ) -> Result<VoteResponse> {
        let builder = Self::authorize(self.client.post(self.url("/vote")), token)
            .json(request)
            .timeout(self.request_timeout);
        self.send(builder, "Vote").await
    }

    async fn cancel_vote(
        &self,
        token: Option<&AccessToken>,
        request: &VoteCancelRequest,
    ) -> Result<VoteResponse> {
        let builder = Self::authorize(self.client.delete(self.url("/vote")), token)
            .json(request)
            .timeout(self.request_timeout);
        self.send(builder, "Vote cancellation").await
    }
}
