//! Error types for the Crypto Advisor client.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Field-level validation messages keyed by form field name.
///
/// Produced locally before any network call so screens can show inline
/// errors next to the offending inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Converts into `Err(AdvisorError::Validation)` when any field failed.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AdvisorError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// A shared error type for the entire client.
///
/// The first four variants follow the client's error taxonomy: transport
/// failure, backend-reported error, rejected credentials and client-side
/// cancellation. The rest cover local concerns.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AdvisorError {
    /// No response was received (connection refused, timeout, DNS, ...).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The backend answered with a validation or business error. `message`
    /// is empty when the body carried no readable detail.
    #[error("{}", api_text(.status, .message))]
    Api { status: u16, message: String },

    /// The backend rejected the credential token.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The caller cancelled the request. Not a true failure.
    #[error("Request cancelled")]
    Cancelled,

    /// Local form validation failed before any request was made.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Persisted client state could not be read or written.
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdvisorError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Message suitable for a screen's single backend-error area.
    ///
    /// Backend errors show their own message; anything else falls back to
    /// `fallback` so raw transport details never reach the user.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } | Self::Unauthorized { message } if !message.is_empty() => {
                message.clone()
            }
            Self::Validation(errors) => errors.to_string(),
            _ => fallback.to_string(),
        }
    }
}

fn api_text(status: &u16, message: &str) -> String {
    if message.is_empty() {
        format!("Backend error ({status})")
    } else {
        message.to_string()
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AdvisorError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AdvisorError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, AdvisorError>`.
pub type Result<T> = std::result::Result<T, AdvisorError>;
