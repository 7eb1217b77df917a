//! Error types for index builds and resolution.
//!
//! Logical misses are never errors here: an unknown lemma is `Ok(None)`.
//! Errors are storage failures, invalid parameters, and querying before
//! the indexes were built.

use lexigraph_storage::{IndexKind, StorageError};
use thiserror::Error;

/// Result type alias for resolver operations.
pub type ResolverResult<T> = Result<T, ResolverError>;

#[derive(Debug, Error)]
pub enum ResolverError {
    /// Underlying storage failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Invalid build or query parameters.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The index has no completion marker: never built, or a build was
    /// interrupted.
    #[error("The {index} has not been built (run build-index first)")]
    IndexNotBuilt { index: IndexKind },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_not_built_message() {
        let err = ResolverError::IndexNotBuilt {
            index: IndexKind::Part,
        };
        assert!(err.to_string().contains("part index"));
    }

    #[test]
    fn test_from_storage_error() {
        let err: ResolverError = StorageError::ReadFailed("io".to_string()).into();
        assert!(matches!(err, ResolverError::Storage(_)));
    }
}
