//! Application layer: session lifecycle, optimistic votes, dashboard
//! loading and onboarding, composed over the core traits.

pub mod context;
pub mod dashboard;
pub mod onboarding;
pub mod session;
pub mod vote;

#[cfg(test)]
mod test_support;

pub use context::AppContext;
pub use dashboard::{DashboardLoader, DashboardState};
pub use onboarding::{OnboardingOutcome, OnboardingService};
pub use session::SessionManager;
pub use vote::{VoteCache, VoteOutcome};
