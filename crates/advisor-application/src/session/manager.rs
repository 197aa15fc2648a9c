use advisor_core::auth::{AccessToken, AuthApi, Credentials, Identity, LoginRequest, SignupRequest, TokenStore};
use advisor_core::{AdvisorError, Result, SessionPhase, SessionSnapshot};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// Mutable session state. Only ever touched through `SessionManager`.
#[derive(Debug, Default)]
struct SessionState {
    token: Option<AccessToken>,
    identity: Option<Identity>,
    initializing: bool,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            initializing: self.initializing,
            identity: self.identity.clone(),
        }
    }

    fn holds(&self, token: &AccessToken) -> bool {
        self.token.as_ref() == Some(token)
    }
}

/// Owns the client's identity state and the persisted credential token.
///
/// `SessionManager` is responsible for:
/// - Resolving a token left by a previous run into an identity (`bootstrap`)
/// - Establishing sessions (`login`, `register`)
/// - Tearing them down (`logout`, and on any failed identity fetch)
/// - Publishing every change to subscribers for route guarding
///
/// It is the only component that reads or writes the [`TokenStore`]. Other
/// components obtain the bearer token through its [`Credentials`] impl.
///
/// Invariant: an identity is held only while a token is held.
pub struct SessionManager {
    auth: Arc<dyn AuthApi>,
    store: Arc<dyn TokenStore>,
    state: Mutex<SessionState>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl SessionManager {
    /// Creates a manager over the given backend and token store.
    ///
    /// The session starts out initializing if a token was left in the store,
    /// and unauthenticated otherwise. Nothing is fetched until `bootstrap`.
    pub fn new(auth: Arc<dyn AuthApi>, store: Arc<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token, starting signed out");
                None
            }
        };

        let state = SessionState {
            initializing: token.is_some(),
            token,
            identity: None,
        };
        let (snapshot_tx, _) = watch::channel(state.snapshot());

        Self {
            auth,
            store,
            state: Mutex::new(state),
            snapshot_tx,
        }
    }

    // ============================================================================
    // Observation
    // ============================================================================

    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// Subscribes to session changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn phase(&self) -> SessionPhase {
        self.snapshot().phase()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.lock().identity.clone()
    }

    pub fn is_initializing(&self) -> bool {
        self.lock().initializing
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Resolves the stored token, if any, into an identity.
    ///
    /// Without a stored token this settles on unauthenticated without any
    /// network call. With one, the identity is fetched; any failure clears
    /// the stored token. Never fails outward.
    pub async fn bootstrap(&self) {
        let stored = match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token during bootstrap");
                None
            }
        };

        let Some(token) = stored else {
            self.update(|state| {
                state.token = None;
                state.identity = None;
                state.initializing = false;
            });
            tracing::info!("[Session] No stored token, signed out");
            return;
        };

        self.update(|state| {
            if !state.holds(&token) {
                state.identity = None;
            }
            state.token = Some(token.clone());
        });

        match self.auth.fetch_identity(&token).await {
            Ok(identity) => {
                tracing::info!(user_id = %identity.id, "[Session] Restored session");
                self.accept_identity(&token, identity);
            }
            Err(e) => {
                tracing::warn!(error = %e, "[Session] Stored token rejected, signing out");
                self.invalidate(&token);
            }
        }

        self.update(|state| state.initializing = false);
    }

    /// Authenticates, persists the issued token and loads the identity.
    ///
    /// A backend failure is returned unmodified and leaves the session as it
    /// was. If the identity cannot be fetched with the fresh token, the token
    /// is treated as invalid: the session is cleared and the error returned.
    /// If the session moved on while the identity was in flight (logout or a
    /// newer login), the result is `AdvisorError::Cancelled`.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<Identity> {
        let response = self.auth.login(credentials).await?;
        let token = response.access_token;

        self.store.save(&token)?;
        self.update(|state| {
            state.token = Some(token.clone());
            state.identity = None;
        });

        match self.auth.fetch_identity(&token).await {
            Ok(identity) => {
                if !self.accept_identity(&token, identity.clone()) {
                    // Logged out or replaced by another login meanwhile
                    return Err(AdvisorError::Cancelled);
                }
                tracing::info!(user_id = %identity.id, "[Session] Signed in");
                Ok(identity)
            }
            Err(e) => {
                tracing::warn!(error = %e, "[Session] Identity lookup failed after login");
                self.invalidate(&token);
                Err(e)
            }
        }
    }

    /// Creates an account, then signs in with the same email and password.
    ///
    /// A failure of the sign-in step after a successful signup means the
    /// account exists but no session was established; the caller should
    /// offer the login screen.
    pub async fn register(&self, details: &SignupRequest) -> Result<Identity> {
        let created = self.auth.signup(details).await?;
        tracing::info!(user_id = %created.id, "[Session] Account created");
        self.login(&details.to_login()).await
    }

    /// Signs out immediately, independent of the network.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "[Session] Failed to remove stored token");
        }
        self.update(|state| {
            state.token = None;
            state.identity = None;
        });
        tracing::info!("[Session] Signed out");
    }

    /// Re-fetches the identity with the current token, e.g. to pick up a
    /// completed onboarding.
    ///
    /// On failure the session is cleared exactly as `bootstrap` does.
    /// Returns the identity now held.
    pub async fn refresh_identity(&self) -> Option<Identity> {
        let Some(token) = self.access_token() else {
            self.update(|state| state.identity = None);
            return None;
        };

        match self.auth.fetch_identity(&token).await {
            Ok(identity) => {
                self.accept_identity(&token, identity);
            }
            Err(e) => {
                tracing::warn!(error = %e, "[Session] Identity refresh failed, signing out");
                self.invalidate(&token);
            }
        }
        self.identity()
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Applies `f` and notifies subscribers if the visible state changed.
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut SessionState),
    {
        let snapshot = {
            let mut state = self.lock();
            f(&mut state);
            state.snapshot()
        };
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    /// Stores `identity` if `token` is still the session's token.
    ///
    /// A response for a token that has since been replaced or cleared is
    /// dropped, which keeps identity from outliving its token.
    fn accept_identity(&self, token: &AccessToken, identity: Identity) -> bool {
        let mut accepted = false;
        self.update(|state| {
            if state.holds(token) {
                state.identity = Some(identity);
                accepted = true;
            } else {
                tracing::debug!("[Session] Dropping identity for a replaced token");
            }
        });
        accepted
    }

    /// Clears the session if `token` is still the session's token.
    fn invalidate(&self, token: &AccessToken) {
        let cleared = {
            let state = self.lock();
            state.holds(token)
        };
        if !cleared {
            return;
        }
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "[Session] Failed to remove stored token");
        }
        self.update(|state| {
            if state.holds(token) {
                state.token = None;
                state.identity = None;
            }
        });
    }
}

impl Credentials for SessionManager {
    fn access_token(&self) -> Option<AccessToken> {
        self.lock().token.clone()
    }
}
