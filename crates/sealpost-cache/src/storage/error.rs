//! Storage error types.

use thiserror::Error;

/// Errors from cache storage backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Database I/O failed.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// Stored value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}
