//! Error types for the publisher client.

use thiserror::Error;

/// Result type for publisher client operations.
pub type Result<T> = std::result::Result<T, PublisherError>;

/// Publisher client errors.
#[derive(Debug, Error)]
pub enum PublisherError {
    /// Configuration error (bad base URL, client could not be built)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response). `description` carries the publisher's
    /// human readable explanation when the body was an error payload.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        description: Option<String>,
    },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl PublisherError {
    /// The server-provided description, if the failure came with one.
    pub fn description(&self) -> Option<&str> {
        match self {
            PublisherError::Api { description, .. } => description.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            PublisherError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
