//! Error types for constructor operations.

use thiserror::Error;

/// Result type for constructor operations.
pub type ConstructorResult<T> = Result<T, ConstructorError>;

/// Errors that can occur in constructor operations.
#[derive(Debug, Error)]
pub enum ConstructorError {
    /// Element not found in the scene.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid operation on an element or the scene.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Saved design index out of range.
    #[error("Design not found at index {0}")]
    DesignNotFound(usize),

    /// Scene or document serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while persisting designs.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
