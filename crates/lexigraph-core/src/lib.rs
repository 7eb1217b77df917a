//! Lexigraph Core
//!
//! Shared vocabulary for the lexigraph workspace: ontology node identifiers
//! and their class/instance classification, relational row types, the label
//! tokenizer that produces index parts, and parsers for ontology dump rows.
//!
//! # Architecture
//! - `types`: `Node`, `NodeKind`, `NodeSet`, `Entry`, `PartEntry`,
//!   `TaxonomyEdge`, `ConceptRelation`, `ConceptRow`
//! - `tokenize`: word-boundary label decomposition
//! - `rows`: TSV/CSV row parsers for label, transition, name and concept dumps
//! - `error`: `CoreError` and the `CoreResult` alias
//!
//! # Example
//!
//! ```
//! use lexigraph_core::{label_parts, Node, NodeKind};
//!
//! let node = Node::new("<wordnet_dog_102084071>");
//! assert_eq!(node.kind(), NodeKind::Class);
//!
//! let parts = label_parts("hot dog 2000");
//! assert_eq!(parts, vec!["hot", "dog"]);
//! ```

pub mod error;
pub mod rows;
pub mod tokenize;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use rows::{parse_concept_row, parse_label_row, parse_name_row, parse_transition_row};
pub use tokenize::label_parts;
pub use types::{
    ConceptRelation, ConceptRow, Entry, Node, NodeKind, NodeSet, PartEntry, TaxonomyEdge,
    CLASS_PREFIX,
};
