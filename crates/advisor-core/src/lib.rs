//! Domain layer of the Crypto Advisor client.
//!
//! Holds the models, closed enumerations and error type shared by every
//! crate, the collaborator traits the backend and token storage are reached
//! through, and the pure pieces of client logic: route guarding, form
//! validation and the dashboard view model.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod onboarding;
pub mod routing;
pub mod session;
pub mod validation;
pub mod vote;

pub use error::{AdvisorError, FieldErrors, Result};
pub use session::{SessionPhase, SessionSnapshot};
