//! Error types for the persistence layer

use thiserror::Error;

/// Failures raised by a [`KeyValueStore`](super::storage::KeyValueStore)
/// backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Recoverable failures from gateway operations. None of these leave the
/// caller's working document in a partially-mutated state; a document is
/// only swapped in after a load or import fully succeeds.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Import text failed to parse or is missing required fields.
    #[error("invalid composition format: {reason}")]
    InvalidFormat { reason: String },

    /// A stored entry exists but no longer parses.
    #[error("stored entry is corrupted: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("no saved composition with id `{0}`")]
    NotFound(String),
}

impl PersistenceError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        PersistenceError::InvalidFormat {
            reason: reason.into(),
        }
    }
}
