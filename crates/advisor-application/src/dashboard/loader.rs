use advisor_core::auth::Credentials;
use advisor_core::dashboard::{DashboardApi, DashboardView};
use advisor_core::{AdvisorError, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Shown when the backend gives no usable message.
pub const DASHBOARD_FALLBACK_ERROR: &str = "Failed to load dashboard";

/// What the dashboard screen displays.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Failed(String),
    Ready(DashboardView),
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn view(&self) -> Option<&DashboardView> {
        match self {
            Self::Ready(view) => Some(view),
            _ => None,
        }
    }
}

/// Fetches the dashboard and publishes the display state.
///
/// Every fetch runs under a `CancellationToken`. A cancelled fetch never
/// writes data or an error, no matter when its response arrives; `reload`
/// cancels the previous fetch before starting the next.
pub struct DashboardLoader {
    api: Arc<dyn DashboardApi>,
    credentials: Arc<dyn Credentials>,
    state_tx: watch::Sender<DashboardState>,
    current: Mutex<Option<CancellationToken>>,
}

impl DashboardLoader {
    pub fn new(api: Arc<dyn DashboardApi>, credentials: Arc<dyn Credentials>) -> Self {
        let (state_tx, _) = watch::channel(DashboardState::Loading);
        Self {
            api,
            credentials,
            state_tx,
            current: Mutex::new(None),
        }
    }

    pub fn state(&self) -> DashboardState {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state_tx.subscribe()
    }

    /// Fetches once under `cancel`.
    ///
    /// Returns `AdvisorError::Cancelled` if `cancel` fired before the
    /// response was applied; display state is then left untouched. Other
    /// failures are published as `Failed` and also returned.
    pub async fn load(&self, cancel: CancellationToken) -> Result<DashboardView> {
        if !self.publish_if_live(&cancel, DashboardState::Loading) {
            return Err(AdvisorError::Cancelled);
        }

        let token = self.credentials.access_token();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Dashboard fetch cancelled in flight");
                return Err(AdvisorError::Cancelled);
            }
            result = self.api.fetch_dashboard(token.as_ref()) => result,
        };

        match result {
            Ok(response) => {
                let view = DashboardView::from(response);
                if !self.publish_if_live(&cancel, DashboardState::Ready(view.clone())) {
                    tracing::debug!("Discarding dashboard response for a cancelled fetch");
                    return Err(AdvisorError::Cancelled);
                }
                tracing::debug!(sections = view.sections.len(), "Dashboard loaded");
                Ok(view)
            }
            Err(e) if e.is_cancelled() => Err(e),
            Err(e) => {
                let failed = DashboardState::Failed(e.user_message(DASHBOARD_FALLBACK_ERROR));
                if !self.publish_if_live(&cancel, failed) {
                    tracing::debug!("Discarding dashboard error for a cancelled fetch");
                    return Err(AdvisorError::Cancelled);
                }
                tracing::warn!(error = %e, "Dashboard fetch failed");
                Err(e)
            }
        }
    }

    /// Cancels any in-flight fetch and starts a new one.
    pub async fn reload(&self) -> Result<DashboardView> {
        let cancel = CancellationToken::new();
        if let Some(previous) = self.lock_current().replace(cancel.clone()) {
            previous.cancel();
        }
        self.load(cancel).await
    }

    /// Cancels the in-flight fetch started by `reload`, e.g. when the view
    /// goes away.
    pub fn cancel(&self) {
        if let Some(current) = self.lock_current().take() {
            current.cancel();
        }
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Publishes `state` unless `cancel` has fired.
    ///
    /// The check and the write happen under the same lock `reload` and
    /// `cancel` take, so a cancellation either lands before the write and
    /// suppresses it, or lands after it.
    fn publish_if_live(&self, cancel: &CancellationToken, state: DashboardState) -> bool {
        let _current = self.lock_current();
        if cancel.is_cancelled() {
            return false;
        }
        self.state_tx.send_replace(state);
        true
    }
}
