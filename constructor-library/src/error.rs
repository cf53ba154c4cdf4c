//! Library client error types.

use thiserror::Error;

/// Result type for library operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Errors that can occur when talking to the asset library backend.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The base URL provided by configuration is invalid.
    #[error("invalid library URL: {0}")]
    InvalidUrl(String),

    /// HTTP layer failed (connection, timeout, etc.).
    #[error("library HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed unexpectedly.
    #[error("failed to parse library payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The response did not match the expected structure.
    #[error("unexpected library response: {0}")]
    UnexpectedResponse(String),
}

impl LibraryError {
    /// Returns true if this error is retryable (transient HTTP failures).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
