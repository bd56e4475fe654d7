//! Record store error types
//!
//! Defines all errors that can occur in the storage layer.

use thiserror::Error;

/// Errors that can occur in the record store
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization of the record file failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Positional update/delete targeted a slot that does not exist
    #[error("Invalid index {index}: store holds {len} records")]
    IndexOutOfRange { index: i64, len: usize },

    /// Mutation attempted before anything was ever written
    #[error("No data: the record store has not been initialized")]
    NoData,
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

impl StorageError {
    /// Whether the caller (rather than the storage medium) is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StorageError::IndexOutOfRange { .. } | StorageError::NoData
        )
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
