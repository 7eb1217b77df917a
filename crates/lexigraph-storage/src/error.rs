//! Storage error types for the RocksDB backend.
//!
//! Storage failures are fatal to the operation that hit them and are always
//! propagated. Logical misses (absent keys) are not errors; they surface as
//! `Ok(None)` or empty results.

use thiserror::Error;

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database failed to open.
    #[error("Failed to open database at '{path}': {message}")]
    OpenFailed { path: String, message: String },

    /// Column family not found (should never happen if DB opened correctly).
    #[error("Column family '{name}' not found")]
    ColumnFamilyNotFound { name: String },

    /// Write operation failed.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Read operation failed.
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Flush operation failed.
    #[error("Flush failed: {0}")]
    FlushFailed(String),

    /// Serialization of a stored value failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A stored key or value could not be decoded.
    ///
    /// Indicates an index written by an incompatible version or on-disk
    /// damage. Rebuilding the index is the recovery path.
    #[error("Corrupted data at {location}: {details}")]
    CorruptedData { location: String, details: String },

    /// A key component contains the reserved separator byte.
    #[error("Invalid key component {component:?}: {reason}")]
    InvalidKey { component: String, reason: String },

    /// Invalid storage configuration.
    #[error("Invalid storage configuration: {0}")]
    InvalidConfig(String),
}

impl StorageError {
    /// Create a corrupted data error.
    pub fn corrupted(location: impl Into<String>, details: impl Into<String>) -> Self {
        Self::CorruptedData {
            location: location.into(),
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_open_failed() {
        let error = StorageError::OpenFailed {
            path: "/tmp/lexicon".to_string(),
            message: "lock held".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("/tmp/lexicon"));
        assert!(msg.contains("lock held"));
    }

    #[test]
    fn test_error_column_family_not_found() {
        let error = StorageError::ColumnFamilyNotFound {
            name: "label_index".to_string(),
        };
        assert!(error.to_string().contains("label_index"));
    }

    #[test]
    fn test_error_corrupted() {
        let error = StorageError::corrupted("label_index/moscow", "unknown version 9");
        let msg = error.to_string();
        assert!(msg.contains("label_index/moscow"));
        assert!(msg.contains("unknown version 9"));
    }

    #[test]
    fn test_error_invalid_key() {
        let error = StorageError::InvalidKey {
            component: "a\0b".to_string(),
            reason: "contains NUL".to_string(),
        };
        assert!(error.to_string().contains("contains NUL"));
    }
}
