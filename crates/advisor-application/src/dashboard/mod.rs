//! Dashboard loading with cancellation.

mod loader;

pub use loader::{DASHBOARD_FALLBACK_ERROR, DashboardLoader, DashboardState};
