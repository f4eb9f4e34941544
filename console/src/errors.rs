//! Error types for the Nimbus console service

use thiserror::Error;

/// Main error type for the console service
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Remote API error ({status}): {body}")]
    RemoteError { status: u16, body: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Shutdown error: {0}")]
    ShutdownError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    /// Whether this error maps to a remote 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConsoleError::NotFound(_))
    }

    /// Whether this error maps to a remote 409
    pub fn is_conflict(&self) -> bool {
        matches!(self, ConsoleError::Conflict(_))
    }
}

impl From<anyhow::Error> for ConsoleError {
    fn from(err: anyhow::Error) -> Self {
        ConsoleError::Internal(err.to_string())
    }
}
