use advisor_core::AdvisorError;
use advisor_core::auth::Credentials;
use advisor_core::vote::{VoteApi, VoteCancelRequest, VoteKey, VoteRequest, VoteType};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// How a vote call ended, as far as local state is concerned.
#[derive(Debug, Clone)]
pub enum VoteOutcome {
    /// The backend accepted the call; the optimistic value stands.
    Confirmed,
    /// The call failed and the key was reverted to its prior value.
    RolledBack(AdvisorError),
    /// The call failed, but a newer call on the same key had already been
    /// issued, so the newer optimistic value was left in place.
    Superseded(AdvisorError),
}

impl VoteOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    pub fn error(&self) -> Option<&AdvisorError> {
        match self {
            Self::Confirmed => None,
            Self::RolledBack(e) | Self::Superseded(e) => Some(e),
        }
    }
}

#[derive(Debug, Default)]
struct VoteEntry {
    vote: Option<VoteType>,
    /// Calls issued for this key that have not resolved yet.
    in_flight: usize,
    /// Sequence number of the most recently issued call for this key.
    latest_request: u64,
}

/// Captured at call time; what a failed call reverts to.
struct Ticket {
    request: u64,
    previous: Option<VoteType>,
}

/// Process-local record of the user's votes with optimistic updates.
///
/// Every call applies its result locally before the network round-trip and
/// reverts on failure. Keys are fully independent of one another.
///
/// When calls on the same key overlap, each carries a per-key sequence
/// number and a failure only rolls back if its call is still the most
/// recent one issued for that key. Otherwise the newer optimistic value is
/// kept and its own call decides.
pub struct VoteCache {
    api: Arc<dyn VoteApi>,
    credentials: Arc<dyn Credentials>,
    entries: RwLock<HashMap<VoteKey, VoteEntry>>,
    sequence: AtomicU64,
}

impl VoteCache {
    /// Creates an empty cache.
    ///
    /// # Arguments
    ///
    /// * `api` - Backend for the vote endpoints
    /// * `credentials` - Source of the bearer token attached to each call
    pub fn new(api: Arc<dyn VoteApi>, credentials: Arc<dyn Credentials>) -> Self {
        Self {
            api,
            credentials,
            entries: RwLock::new(HashMap::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Current local vote for `key`. Never blocks on the network.
    pub fn current_vote(&self, key: &VoteKey) -> Option<VoteType> {
        self.read().get(key).and_then(|entry| entry.vote)
    }

    /// True while any call for `key` is unresolved.
    pub fn is_pending(&self, key: &VoteKey) -> bool {
        self.read()
            .get(key)
            .is_some_and(|entry| entry.in_flight > 0)
    }

    /// All keys that currently hold a vote.
    pub fn votes(&self) -> BTreeMap<VoteKey, VoteType> {
        self.read()
            .iter()
            .filter_map(|(key, entry)| entry.vote.map(|vote| (key.clone(), vote)))
            .collect()
    }

    /// Records `vote_type` for `key` and sends it to the backend.
    ///
    /// Voting the opposite direction replaces the existing vote. On failure
    /// the key reverts to whatever it held right before this call.
    pub async fn cast_vote(&self, key: &VoteKey, vote_type: VoteType) -> VoteOutcome {
        let ticket = self.begin(key, Some(vote_type));
        let token = self.credentials.access_token();
        let request = VoteRequest::new(key, vote_type);

        let result = self.api.cast_vote(token.as_ref(), &request).await;
        self.finish(key, ticket, result.map(|_| ()))
    }

    /// Removes the vote for `key` and tells the backend.
    ///
    /// Legal on a key without a vote. On failure the prior value is restored.
    pub async fn cancel_vote(&self, key: &VoteKey) -> VoteOutcome {
        let ticket = self.begin(key, None);
        let token = self.credentials.access_token();
        let request = VoteCancelRequest::from(key);

        let result = self.api.cancel_vote(token.as_ref(), &request).await;
        self.finish(key, ticket, result.map(|_| ()))
    }

    /// Vote-button behavior.
    ///
    /// Ignored (returns `None`) while a call for `key` is pending. Pressing
    /// the active direction cancels the vote; anything else casts it.
    pub async fn toggle(&self, key: &VoteKey, vote_type: VoteType) -> Option<VoteOutcome> {
        if self.is_pending(key) {
            tracing::debug!(%key, "Vote ignored while a call is pending");
            return None;
        }

        let outcome = if self.current_vote(key) == Some(vote_type) {
            self.cancel_vote(key).await
        } else {
            self.cast_vote(key, vote_type).await
        };
        Some(outcome)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<VoteKey, VoteEntry>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<VoteKey, VoteEntry>> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Optimistically applies `vote` and registers the call as in flight.
    fn begin(&self, key: &VoteKey, vote: Option<VoteType>) -> Ticket {
        let request = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let mut entries = self.write();
        let entry = entries.entry(key.clone()).or_default();

        let previous = entry.vote;
        entry.vote = vote;
        entry.in_flight += 1;
        entry.latest_request = request;

        Ticket { request, previous }
    }

    /// Resolves a call, rolling back on failure when it is still the latest.
    fn finish(&self, key: &VoteKey, ticket: Ticket, result: advisor_core::Result<()>) -> VoteOutcome {
        let mut entries = self.write();
        let Some(entry) = entries.get_mut(key) else {
            // Entries with calls in flight are never removed
            return match result {
                Ok(()) => VoteOutcome::Confirmed,
                Err(e) => VoteOutcome::Superseded(e),
            };
        };

        entry.in_flight = entry.in_flight.saturating_sub(1);

        let outcome = match result {
            Ok(()) => VoteOutcome::Confirmed,
            Err(e) if entry.latest_request == ticket.request => {
                tracing::warn!(%key, error = %e, "Vote failed, rolling back");
                entry.vote = ticket.previous;
                VoteOutcome::RolledBack(e)
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "Vote failed after a newer vote, keeping the newer value");
                VoteOutcome::Superseded(e)
            }
        };

        if entry.vote.is_none() && entry.in_flight == 0 {
            entries.remove(key);
        }
        outcome
    }
}
