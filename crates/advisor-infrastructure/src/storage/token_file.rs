//! File-backed credential token storage.
//!
//! The token is kept as a one-key JSON document (`{"auth_token": "..."}`)
//! so that it survives restarts. Writes go through a temporary file and an
//! atomic rename, and on Unix the file is restricted to the owner.

use advisor_core::auth::{AccessToken, TOKEN_KEY, TokenStore};
use advisor_core::{AdvisorError, Result};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::paths::AdvisorPaths;

/// Token store persisting to a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default location (`<config_dir>/token.json`).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(AdvisorPaths::token_file()?))
    }

    /// Creates a store at a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| AdvisorError::storage("Token path has no file name"))?;
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        Ok(self.path.with_file_name(tmp_name))
    }

    fn write_atomic(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        tmp_file.write_all(contents.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AccessToken>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let document: Map<String, Value> = serde_json::from_str(&content)?;
        Ok(document
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(AccessToken::from))
    }

    fn save(&self, token: &AccessToken) -> Result<()> {
        let mut document = Map::new();
        document.insert(
            TOKEN_KEY.to_string(),
            Value::String(token.as_str().to_string()),
        );
        let contents = serde_json::to_string_pretty(&Value::Object(document))?;
        self.write_atomic(&contents)?;
        tracing::debug!(path = %self.path.display(), "Stored credential token");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Removed credential token");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
