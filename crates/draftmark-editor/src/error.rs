//! Error types for the editor layer.

use thiserror::Error;

/// Errors that can occur while persisting or restoring documents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Invalid document state: {0}")]
    InvalidState(String),

    #[error("Storage is not available")]
    StoreUnavailable,

    #[error("Save failed: {0}")]
    SaveFailure(String),
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        EditorError::MalformedSnapshot(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
