//! Error types for lexigraph-core.
//!
//! Row parse failures are never fatal to an ingestion run: callers skip the
//! row and count it. They are still typed so the caller can log *why*.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while parsing ontology dump rows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A dump row did not have the expected shape.
    ///
    /// # When This Occurs
    ///
    /// - Fewer tab-separated columns than the row kind requires
    /// - A label value without an `@lang` suffix or without quotes
    /// - An empty node identifier
    #[error("Malformed {kind} row: {reason}")]
    MalformedRow {
        /// Which row kind was being parsed (e.g. "label", "concept")
        kind: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// A concept-relation row named a relation outside the closed set.
    #[error("Unknown concept relation '{0}'")]
    UnknownRelation(String),
}

impl CoreError {
    /// Create a malformed row error.
    pub fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            kind,
            reason: reason.into(),
        }
    }
}
