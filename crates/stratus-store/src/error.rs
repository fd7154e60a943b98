//! Store error types.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller-supplied fields were missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No record matched the given key.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying database failure; any in-flight transaction has been
    /// rolled back.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
