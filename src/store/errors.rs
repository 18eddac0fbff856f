//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    // Remote table API
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("Failed to decode store response: {0}")]
    Decode(String),

    // Row invariants
    #[error("Record already exists for {0}")]
    Conflict(String),

    #[error("No record updated for {0}")]
    MissingRow(String),

    // Setup
    #[error("Store configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}
