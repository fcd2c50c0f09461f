//! Client error types.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} {path} returned {status}: {body}")]
    Status {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("request cancelled")]
    Cancelled,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("id {0} is outside the service's 32-bit id range")]
    IdOutOfRange(i64),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns true if the service answered 404 for the requested object.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}
