//! Observable session state.

use serde::{Deserialize, Serialize};

use crate::auth::Identity;

/// Phase of the session state machine.
///
/// `Initializing` is left exactly once and never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Initializing,
    Authenticated,
    Unauthenticated,
}

/// What the route layer sees of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// True until the first resolution attempt of a stored token completes.
    pub initializing: bool,
    pub identity: Option<Identity>,
}

impl SessionSnapshot {
    pub fn phase(&self) -> SessionPhase {
        if self.initializing {
            SessionPhase::Initializing
        } else if self.identity.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Authenticated
    }
}
