//! Error types for Biblio Core

use thiserror::Error;

/// Result type alias using BiblioError
pub type Result<T> = std::result::Result<T, BiblioError>;

/// Top-level error type for all Biblio operations
#[derive(Debug, Error)]
pub enum BiblioError {
    /// Transport failure: backend unreachable, connection reset, timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("HTTP error ({status}): {body}")]
    Http { status: u16, body: String },

    /// Login or registration was rejected; the message is already human-readable
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BiblioError {
    /// Whether this error came from talking to the backend
    /// (as opposed to local configuration or credential storage)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            BiblioError::Network(_) | BiblioError::Http { .. } | BiblioError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for BiblioError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BiblioError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            BiblioError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            BiblioError::Network(err.to_string())
        }
    }
}

/// Errors that occur while reading or writing the persisted credential
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed credential file: {0}")]
    Malformed(String),

    #[error("No credential location available on this platform")]
    NoLocation,
}
