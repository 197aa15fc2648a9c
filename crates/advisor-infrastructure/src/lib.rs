//! Infrastructure layer: filesystem paths, token persistence and
//! configuration loading.

pub mod config;
pub mod paths;
pub mod storage;

pub use crate::config::ClientConfig;
pub use crate::paths::AdvisorPaths;
pub use crate::storage::FileTokenStore;
