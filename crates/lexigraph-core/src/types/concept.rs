//! Auxiliary concept-relation rows.
//!
//! Relation names arrive as free-text tokens in the dump. They map onto a
//! closed enum with a fixed storage code; anything else is rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Concept relation kinds, with their on-disk codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ConceptRelation {
    ConceptuallyRelatedTo = 1,
    DerivedFrom = 2,
    Synonym = 3,
}

impl ConceptRelation {
    /// All variants in code order.
    pub const ALL: [ConceptRelation; 3] = [
        ConceptRelation::ConceptuallyRelatedTo,
        ConceptRelation::DerivedFrom,
        ConceptRelation::Synonym,
    ];

    /// Storage code.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ConceptRelation::ConceptuallyRelatedTo),
            2 => Some(ConceptRelation::DerivedFrom),
            3 => Some(ConceptRelation::Synonym),
            _ => None,
        }
    }

    /// Token used in dump files.
    pub fn token(self) -> &'static str {
        match self {
            ConceptRelation::ConceptuallyRelatedTo => "ConceptuallyRelatedTo",
            ConceptRelation::DerivedFrom => "DerivedFrom",
            ConceptRelation::Synonym => "Synonym",
        }
    }
}

impl FromStr for ConceptRelation {
    type Err = CoreError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "ConceptuallyRelatedTo" => Ok(ConceptRelation::ConceptuallyRelatedTo),
            "DerivedFrom" => Ok(ConceptRelation::DerivedFrom),
            "Synonym" => Ok(ConceptRelation::Synonym),
            other => Err(CoreError::UnknownRelation(other.to_string())),
        }
    }
}

impl fmt::Display for ConceptRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One (relation, concept, form, pos) row.
///
/// `pos` is a part-of-speech tag, `?` when the dump did not carry one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConceptRow {
    pub relation: ConceptRelation,
    pub concept: String,
    pub form: String,
    pub pos: String,
}

/// Part-of-speech placeholder for concepts without a tag.
pub const UNKNOWN_POS: &str = "?";
