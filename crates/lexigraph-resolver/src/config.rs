//! Build and query parameters.
//!
//! `IndexerConfig` and `CompoundConfig` are the serde-facing shapes loaded
//! from configuration files. `CompoundQuery` is the validated form the
//! combination search accepts; it cannot hold out-of-range bounds.

use serde::{Deserialize, Serialize};

use crate::error::{ResolverError, ResolverResult};

/// Records per committed write batch during index builds.
pub const DEFAULT_BATCH_SIZE: usize = 100_000;

/// Upper bound on the combination length of the best-combination search.
///
/// The search enumerates every order-preserving combination of up to
/// `max_len` lemmas, which grows combinatorially with the phrase length.
pub const MAX_COMBINATION_LEN: usize = 4;

/// Index build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Records per write batch (default: 100,000).
    pub batch_size: usize,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl IndexerConfig {
    pub fn validate(&self) -> ResolverResult<()> {
        if self.batch_size == 0 {
            return Err(ResolverError::InvalidConfig(
                "indexer.batch_size must be >= 1, got 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Best-combination search settings as they appear in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompoundConfig {
    /// Smallest acceptable result set (default: 1).
    pub min_threshold: usize,
    /// Shortest combination tried (default: 1).
    pub init_len: usize,
    /// Longest combination tried (default: 3).
    pub max_len: usize,
    /// Reduce the winning set to classes, or to one instance (default: true).
    pub prefer_classes: bool,
}

impl Default for CompoundConfig {
    fn default() -> Self {
        Self {
            min_threshold: 1,
            init_len: 1,
            max_len: 3,
            prefer_classes: true,
        }
    }
}

impl CompoundConfig {
    /// Validate into a [`CompoundQuery`].
    pub fn to_query(&self) -> ResolverResult<CompoundQuery> {
        CompoundQuery::new(
            self.min_threshold,
            self.init_len,
            self.max_len,
            self.prefer_classes,
        )
    }
}

/// Validated parameters of the best-combination search.
///
/// Invariants: `min_threshold >= 1` and
/// `1 <= init_len <= max_len <= MAX_COMBINATION_LEN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundQuery {
    min_threshold: usize,
    init_len: usize,
    max_len: usize,
    prefer_classes: bool,
}

impl CompoundQuery {
    /// # Errors
    ///
    /// `ResolverError::InvalidConfig` when a bound is out of range.
    pub fn new(
        min_threshold: usize,
        init_len: usize,
        max_len: usize,
        prefer_classes: bool,
    ) -> ResolverResult<Self> {
        if min_threshold == 0 {
            return Err(ResolverError::InvalidConfig(
                "compound.min_threshold must be >= 1, got 0".to_string(),
            ));
        }
        if init_len == 0 {
            return Err(ResolverError::InvalidConfig(
                "compound.init_len must be >= 1, got 0".to_string(),
            ));
        }
        if init_len > max_len {
            return Err(ResolverError::InvalidConfig(format!(
                "compound.init_len ({}) must be <= compound.max_len ({})",
                init_len, max_len
            )));
        }
        if max_len > MAX_COMBINATION_LEN {
            return Err(ResolverError::InvalidConfig(format!(
                "compound.max_len must be <= {}, got {}",
                MAX_COMBINATION_LEN, max_len
            )));
        }
        Ok(Self {
            min_threshold,
            init_len,
            max_len,
            prefer_classes,
        })
    }

    pub fn min_threshold(&self) -> usize {
        self.min_threshold
    }

    pub fn init_len(&self) -> usize {
        self.init_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn prefer_classes(&self) -> bool {
        self.prefer_classes
    }

    /// Same bounds, different class preference.
    #[must_use]
    pub fn with_prefer_classes(mut self, prefer_classes: bool) -> Self {
        self.prefer_classes = prefer_classes;
        self
    }
}

impl Default for CompoundQuery {
    fn default() -> Self {
        Self {
            min_threshold: 1,
            init_len: 1,
            max_len: 3,
            prefer_classes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_agree() {
        let from_config = CompoundConfig::default().to_query().unwrap();
        assert_eq!(from_config, CompoundQuery::default());
        assert!(IndexerConfig::default().validate().is_ok());
        assert_eq!(IndexerConfig::default().batch_size, 100_000);
    }

    #[test]
    fn test_zero_batch_size() {
        let config = IndexerConfig { batch_size: 0 };
        assert!(matches!(
            config.validate(),
            Err(ResolverError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_query_bounds() {
        assert!(CompoundQuery::new(0, 1, 3, true).is_err());
        assert!(CompoundQuery::new(1, 0, 3, true).is_err());
        assert!(CompoundQuery::new(1, 3, 2, true).is_err());
        assert!(CompoundQuery::new(1, 1, MAX_COMBINATION_LEN + 1, true).is_err());
        assert!(CompoundQuery::new(1, 1, MAX_COMBINATION_LEN, true).is_ok());
        assert!(CompoundQuery::new(5, 2, 2, false).is_ok());
    }

    #[test]
    fn test_with_prefer_classes() {
        let query = CompoundQuery::default().with_prefer_classes(false);
        assert!(!query.prefer_classes());
        assert_eq!(query.max_len(), 3);
    }
}
