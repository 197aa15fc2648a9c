//! Session lifecycle.
//!
//! - `manager`: Identity state and credential ownership (`SessionManager`)

mod manager;

pub use manager::SessionManager;
