//! Core data types shared by storage, resolution and ingestion.

mod concept;
mod entry;
mod node;

pub use concept::{ConceptRelation, ConceptRow, UNKNOWN_POS};
pub use entry::{Entry, PartEntry, TaxonomyEdge};
pub use node::{Node, NodeKind, NodeSet, CLASS_PREFIX};
