//! Client configuration.
//!
//! Loaded from `<config_dir>/config.toml`; a missing or empty file means
//! defaults. Environment variables override the file:
//!
//! - `ADVISOR_API_BASE_URL`: backend base URL
//! - `ADVISOR_TOKEN_FILE`: where the credential token is persisted
//!
//! ```toml
//! api_base_url = "https://advisor.example.com"
//! request_timeout_secs = 15
//! dashboard_timeout_secs = 60
//! ```

use advisor_core::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::paths::AdvisorPaths;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
/// The dashboard may generate its insight on demand, so it gets far longer.
pub const DEFAULT_DASHBOARD_TIMEOUT_SECS: u64 = 60;

pub const API_BASE_URL_ENV: &str = "ADVISOR_API_BASE_URL";
pub const TOKEN_FILE_ENV: &str = "ADVISOR_TOKEN_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub dashboard_timeout_secs: u64,
    /// Overrides the default token location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            dashboard_timeout_secs: DEFAULT_DASHBOARD_TIMEOUT_SECS,
            token_file: None,
        }
    }
}

impl ClientConfig {
    /// Loads the default config file and applies process environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&AdvisorPaths::config_file()?)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, returning defaults when it does not exist or is empty.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(&content)?)
    }

    /// Applies overrides from a variable lookup (normally the environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(path) = lookup(TOKEN_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            self.token_file = Some(PathBuf::from(path));
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AdvisorError::config(format!(
                "api_base_url must start with http:// or https:// (got '{}')",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 || self.dashboard_timeout_secs == 0 {
            return Err(AdvisorError::config("timeouts must be greater than zero"));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn dashboard_timeout(&self) -> Duration {
        Duration::from_secs(self.dashboard_timeout_secs)
    }

    /// Where the token store should persist.
    pub fn token_path(&self) -> Result<PathBuf> {
        match &self.token_file {
            Some(path) => Ok(path.clone()),
            None => Ok(AdvisorPaths::token_file()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ClientConfig::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.dashboard_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "api_base_url = \"https://api.example.com/\"\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "api_base_url = ").unwrap();

        assert!(matches!(
            ClientConfig::load_from(&path),
            Err(AdvisorError::Serialization { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (API_BASE_URL_ENV, "https://staging.example.com"),
            (TOKEN_FILE_ENV, "/tmp/advisor-token.json"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "https://staging.example.com");
        assert_eq!(
            config.token_path().unwrap(),
            PathBuf::from("/tmp/advisor-token.json")
        );
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let mut config = ClientConfig::default();
        config.apply_overrides(|_| Some("  ".to_string()));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.token_file.is_none());
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::default().validate().is_ok());

        let config = ClientConfig {
            api_base_url: "localhost:8000".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
