//! In-process backend doubles shared by the application-layer tests.

use advisor_core::auth::{
    AccessToken, AuthApi, Identity, LoginRequest, LoginResponse, SignupRequest, SignupResponse,
};
use advisor_core::dashboard::{DashboardApi, DashboardResponse};
use advisor_core::onboarding::{OnboardingApi, OnboardingRequest, OnboardingResponse};
use advisor_core::vote::{VoteApi, VoteCancelRequest, VoteKey, VoteRequest, VoteResponse, VoteType};
use advisor_core::{AdvisorError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::oneshot;

pub fn identity(id: &str, onboarding_done: bool) -> Identity {
    Identity {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        name: id.to_uppercase(),
        onboarding_done,
    }
}

/// Yields until `condition` holds. Panics after a generous number of polls.
pub async fn wait_until<F: Fn() -> bool>(condition: F) {
    for _ in 0..10_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}

// ============================================================================
// Auth
// ============================================================================

struct Account {
    password: String,
    token: AccessToken,
}

/// Accounts by email, identities by token.
///
/// Identity lookups can be gated so tests control when they complete.
#[derive(Default)]
pub struct MockAuth {
    accounts: Mutex<HashMap<String, Account>>,
    identities: Mutex<HashMap<String, Identity>>,
    gates: Mutex<Vec<oneshot::Receiver<()>>>,
    offline: AtomicBool,
    pub login_calls: AtomicUsize,
    pub identity_calls: AtomicUsize,
}

impl MockAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account whose token resolves to `identity` (or is
    /// rejected when `identity` is `None`).
    pub fn add_account(&self, email: &str, password: &str, token: &str, identity: Option<Identity>) {
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                token: AccessToken::new(token),
            },
        );
        if let Some(identity) = identity {
            self.set_identity(token, identity);
        }
    }

    pub fn set_identity(&self, token: &str, identity: Identity) {
        self.identities
            .lock()
            .unwrap()
            .insert(token.to_string(), identity);
    }

    pub fn revoke(&self, token: &str) {
        self.identities.lock().unwrap().remove(token);
    }

    /// Marks the identity behind `token` as onboarded.
    pub fn complete_onboarding(&self, token: &str) {
        if let Some(identity) = self.identities.lock().unwrap().get_mut(token) {
            identity.onboarding_done = true;
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// The next identity lookup waits until the returned sender fires.
    pub fn gate_identity(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push(rx);
        tx
    }
}

#[async_trait]
impl AuthApi for MockAuth {
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AdvisorError::transport("offline"));
        }
        if self.accounts.lock().unwrap().contains_key(&request.email) {
            return Err(AdvisorError::api(400, "Email already registered"));
        }
        let id = format!("user-{}", self.accounts.lock().unwrap().len() + 1);
        let token = format!("token-{id}");
        self.add_account(
            &request.email,
            &request.password,
            &token,
            Some(Identity {
                id: id.clone(),
                email: request.email.clone(),
                name: request.name.clone(),
                onboarding_done: false,
            }),
        );
        Ok(SignupResponse {
            id,
            email: request.email.clone(),
            name: request.name.clone(),
        })
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(AdvisorError::transport("offline"));
        }
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(&request.email) {
            Some(account) if account.password == request.password => Ok(LoginResponse {
                access_token: account.token.clone(),
                token_type: "bearer".to_string(),
            }),
            _ => Err(AdvisorError::api(400, "Incorrect email or password")),
        }
    }

    async fn fetch_identity(&self, token: &AccessToken) -> Result<Identity> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        let gate = {
            let mut gates = self.gates.lock().unwrap();
            if gates.is_empty() {
                None
            } else {
                Some(gates.remove(0))
            }
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(AdvisorError::transport("offline"));
        }
        self.identities
            .lock()
            .unwrap()
            .get(token.as_str())
            .cloned()
            .ok_or_else(|| AdvisorError::unauthorized("Could not validate credentials"))
    }
}

// ============================================================================
// Votes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteCall {
    Cast(VoteKey, VoteType),
    Cancel(VoteKey),
}

struct PendingVote {
    call: VoteCall,
    token: Option<AccessToken>,
    reply: Option<oneshot::Sender<Result<()>>>,
}

/// Vote backend whose calls stay in flight until the test answers them.
#[derive(Default)]
pub struct GatedVoteApi {
    calls: Mutex<Vec<PendingVote>>,
}

impl GatedVoteApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call(&self, index: usize) -> VoteCall {
        self.calls.lock().unwrap()[index].call.clone()
    }

    pub fn token(&self, index: usize) -> Option<AccessToken> {
        self.calls.lock().unwrap()[index].token.clone()
    }

    /// Completes call `index` with `result`.
    pub fn respond(&self, index: usize, result: Result<()>) {
        let reply = self.calls.lock().unwrap()[index].reply.take();
        if let Some(reply) = reply {
            let _ = reply.send(result);
        }
    }

    async fn enqueue(&self, call: VoteCall, token: Option<&AccessToken>) -> Result<VoteResponse> {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().unwrap().push(PendingVote {
            call,
            token: token.cloned(),
            reply: Some(tx),
        });
        match rx.await {
            Ok(Ok(())) => Ok(VoteResponse {
                status: "ok".to_string(),
                action: "created".to_string(),
            }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(AdvisorError::transport("dropped")),
        }
    }
}

#[async_trait]
impl VoteApi for GatedVoteApi {
    async fn cast_vote(
        &self,
        token: Option<&AccessToken>,
        request: &VoteRequest,
    ) -> Result<VoteResponse> {
        let key = VoteKey::new(request.section_type, request.item_id.clone());
        self.enqueue(VoteCall::Cast(key, request.vote_type), token)
            .await
    }

    async fn cancel_vote(
        &self,
        token: Option<&AccessToken>,
        request: &VoteCancelRequest,
    ) -> Result<VoteResponse> {
        let key = VoteKey::new(request.section_type, request.item_id.clone());
        self.enqueue(VoteCall::Cancel(key), token).await
    }
}

/// Vote backend that answers at once, failing while `fail` is set.
#[derive(Default)]
pub struct InstantVoteApi {
    pub fail: AtomicBool,
    pub calls: Mutex<Vec<VoteCall>>,
}

impl InstantVoteApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn answer(&self, call: VoteCall) -> Result<VoteResponse> {
        self.calls.lock().unwrap().push(call);
        if self.fail.load(Ordering::SeqCst) {
            Err(AdvisorError::api(500, "Internal Server Error"))
        } else {
            Ok(VoteResponse {
                status: "ok".to_string(),
                action: "created".to_string(),
            })
        }
    }
}

#[async_trait]
impl VoteApi for InstantVoteApi {
    async fn cast_vote(
        &self,
        _token: Option<&AccessToken>,
        request: &VoteRequest,
    ) -> Result<VoteResponse> {
        let key = VoteKey::new(request.section_type, request.item_id.clone());
        self.answer(VoteCall::Cast(key, request.vote_type))
    }

    async fn cancel_vote(
        &self,
        _token: Option<&AccessToken>,
        request: &VoteCancelRequest,
    ) -> Result<VoteResponse> {
        let key = VoteKey::new(request.section_type, request.item_id.clone());
        self.answer(VoteCall::Cancel(key))
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// Dashboard backend whose fetches wait for the test to answer them.
#[derive(Default)]
pub struct GatedDashboardApi {
    replies: Mutex<Vec<Option<oneshot::Sender<Result<DashboardResponse>>>>>,
    tokens: Mutex<Vec<Option<AccessToken>>>,
}

impl GatedDashboardApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.replies.lock().unwrap().len()
    }

    pub fn token(&self, index: usize) -> Option<AccessToken> {
        self.tokens.lock().unwrap()[index].clone()
    }

    pub fn respond(&self, index: usize, result: Result<DashboardResponse>) {
        let reply = self.replies.lock().unwrap()[index].take();
        if let Some(reply) = reply {
            let _ = reply.send(result);
        }
    }
}

#[async_trait]
impl DashboardApi for GatedDashboardApi {
    async fn fetch_dashboard(&self, token: Option<&AccessToken>) -> Result<DashboardResponse> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push(Some(tx));
        self.tokens.lock().unwrap().push(token.cloned());
        rx.await
            .unwrap_or_else(|_| Err(AdvisorError::transport("dropped")))
    }
}

// ============================================================================
// Onboarding
// ============================================================================

/// Stores preferences and flips the caller's identity to onboarded.
pub struct MockOnboardingApi {
    auth: std::sync::Arc<MockAuth>,
    pub fail: AtomicBool,
    pub submissions: Mutex<Vec<OnboardingRequest>>,
}

impl MockOnboardingApi {
    pub fn new(auth: std::sync::Arc<MockAuth>) -> Self {
        Self {
            auth,
            fail: AtomicBool::new(false),
            submissions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl OnboardingApi for MockOnboardingApi {
    async fn submit_onboarding(
        &self,
        token: Option<&AccessToken>,
        request: &OnboardingRequest,
    ) -> Result<OnboardingResponse> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AdvisorError::api(400, "Preferences already saved"));
        }
        let Some(token) = token else {
            return Err(AdvisorError::unauthorized("Not authenticated"));
        };
        self.submissions.lock().unwrap().push(request.clone());
        self.auth.complete_onboarding(token.as_str());
        Ok(OnboardingResponse {
            id: "prefs-1".to_string(),
            user_id: "user-1".to_string(),
            assets: request.assets.iter().map(ToString::to_string).collect(),
            investor_type: request.investor_type.to_string(),
            content_types: request
                .content_types
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Hands out a fixed bearer token.
pub struct FixedCredentials(Option<AccessToken>);

impl FixedCredentials {
    pub fn new(token: Option<&str>) -> Self {
        Self(token.map(AccessToken::new))
    }
}

impl advisor_core::auth::Credentials for FixedCredentials {
    fn access_token(&self) -> Option<AccessToken> {
        self.0.clone()
    }
}
