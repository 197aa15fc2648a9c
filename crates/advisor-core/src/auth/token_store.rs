//! Persisted credential token storage.

use std::sync::Mutex;

use super::model::AccessToken;
use crate::error::Result;

/// Fixed key the credential token is stored under.
pub const TOKEN_KEY: &str = "auth_token";

/// Narrow read/write/clear interface over the single persisted credential.
///
/// Only the session manager holds one of these; nothing else in the client
/// reads or writes the token directly. Calls are synchronous so that logout
/// can complete without awaiting anything.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    fn load(&self) -> Result<Option<AccessToken>>;

    /// Persists `token`, replacing any previous value.
    fn save(&self, token: &AccessToken) -> Result<()>;

    /// Removes the stored token. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;
}

/// Process-local token store.
///
/// Useful for tests and for ephemeral sessions where nothing should touch
/// the filesystem.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AccessToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`, as if left by a previous run.
    pub fn with_token(token: impl Into<AccessToken>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AccessToken>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, token: &AccessToken) -> Result<()> {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}
