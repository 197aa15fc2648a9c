//! Unified path management for client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/crypto-advisor/    # Config directory (platform default)
//! ├── config.toml              # Client configuration
//! └── token.json               # Persisted credential token
//! ```
//!
//! Setting `ADVISOR_CONFIG_DIR` relocates the whole directory.

use std::path::PathBuf;

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "crypto-advisor";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "ADVISOR_CONFIG_DIR";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot determine config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for advisor_core::AdvisorError {
    fn from(err: PathError) -> Self {
        advisor_core::AdvisorError::config(err.to_string())
    }
}

pub struct AdvisorPaths;

impl AdvisorPaths {
    /// Returns the client configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/crypto-advisor/`
    /// - `Err(PathError::ConfigDirNotFound)`: no home/config directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Path to the persisted credential token.
    pub fn token_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("token.json"))
    }
}
