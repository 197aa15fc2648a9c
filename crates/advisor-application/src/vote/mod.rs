//! Optimistic vote state.
//!
//! - `cache`: Local vote record with rollback on failure (`VoteCache`)

mod cache;

pub use cache::{VoteCache, VoteOutcome};
