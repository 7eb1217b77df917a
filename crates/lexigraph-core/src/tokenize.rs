//! Label decomposition into index parts.
//!
//! A part is a maximal run of Unicode letters bounded by word boundaries.
//! Digits and underscores never appear in a part, and a token mixing
//! letters with digits (`mp3`) yields nothing, because the word boundary
//! falls outside the whole alphanumeric run.

use std::sync::OnceLock;

use regex::Regex;

/// Word pattern: letters only, between word boundaries.
static WORD_RE: OnceLock<Regex> = OnceLock::new();

fn word_re() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"\b[^\W\d_]+\b").expect("word regex must compile"))
}

/// Split a label into its word parts, in order of appearance.
///
/// ```
/// use lexigraph_core::label_parts;
///
/// assert_eq!(label_parts("new york city"), vec!["new", "york", "city"]);
/// assert_eq!(label_parts("apollo 11"), vec!["apollo"]);
/// assert!(label_parts("1984").is_empty());
/// ```
pub fn label_parts(label: &str) -> Vec<&str> {
    word_re().find_iter(label).map(|m| m.as_str()).collect()
}

/// Number of word parts in a label.
pub fn part_count(label: &str) -> usize {
    word_re().find_iter(label).count()
}
