//! Relational row types: label entries, part entries and taxonomy edges.

use serde::{Deserialize, Serialize};

use super::node::Node;
use crate::tokenize::label_parts;

/// A (label, node, language) row from a label dump.
///
/// The label is always stored lowercase; [`Entry::new`] normalises it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub label: String,
    pub node: Node,
    pub lang: String,
}

impl Entry {
    /// Build an entry, lowercasing the label.
    pub fn new(label: &str, node: impl Into<Node>, lang: impl Into<String>) -> Self {
        Self {
            label: label.to_lowercase(),
            node: node.into(),
            lang: lang.into(),
        }
    }

    /// Decompose this entry's label into part entries.
    ///
    /// A label repeating a word yields that part once per occurrence; the
    /// relational store absorbs the duplicates.
    pub fn parts(&self) -> impl Iterator<Item = PartEntry> + '_ {
        label_parts(&self.label)
            .into_iter()
            .map(move |part| PartEntry::new(part, self.node.clone()))
    }
}

/// A (part, node) row: `node` has a label containing the word `part`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartEntry {
    pub part: String,
    pub node: Node,
}

impl PartEntry {
    pub fn new(part: impl Into<String>, node: Node) -> Self {
        Self {
            part: part.into(),
            node,
        }
    }
}

/// Directed taxonomy edge.
///
/// Edge sets may contain cycles in malformed input; nothing downstream
/// assumes acyclicity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxonomyEdge {
    /// Instance node -> class node.
    InstanceOf { instance: Node, class: Node },
    /// Child class -> parent class.
    Hierarchy { child: Node, parent: Node },
}

impl TaxonomyEdge {
    pub fn instance_of(instance: impl Into<Node>, class: impl Into<Node>) -> Self {
        Self::InstanceOf {
            instance: instance.into(),
            class: class.into(),
        }
    }

    pub fn hierarchy(child: impl Into<Node>, parent: impl Into<Node>) -> Self {
        Self::Hierarchy {
            child: child.into(),
            parent: parent.into(),
        }
    }

    /// (from, to) endpoints regardless of edge kind.
    pub fn endpoints(&self) -> (&Node, &Node) {
        match self {
            TaxonomyEdge::InstanceOf { instance, class } => (instance, class),
            TaxonomyEdge::Hierarchy { child, parent } => (child, parent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_lowercases_label() {
        let entry = Entry::new("Vladimir PUTIN", "<Vladimir_Putin>", "eng");
        assert_eq!(entry.label, "vladimir putin");
        assert_eq!(entry.node.as_str(), "<Vladimir_Putin>");
        assert_eq!(entry.lang, "eng");
    }

    #[test]
    fn test_entry_parts() {
        let entry = Entry::new("единая россия", "<United_Russia>", "rus");
        let parts: Vec<PartEntry> = entry.parts().collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].part, "единая");
        assert_eq!(parts[1].part, "россия");
        assert!(parts.iter().all(|p| p.node.as_str() == "<United_Russia>"));
    }

    #[test]
    fn test_taxonomy_edge_endpoints() {
        let edge = TaxonomyEdge::instance_of("<Moscow>", "<wordnet_city_108524735>");
        let (from, to) = edge.endpoints();
        assert_eq!(from.as_str(), "<Moscow>");
        assert_eq!(to.as_str(), "<wordnet_city_108524735>");

        let edge = TaxonomyEdge::hierarchy("<wordnet_city>", "<wordnet_location>");
        assert_eq!(edge.endpoints().1.as_str(), "<wordnet_location>");
    }
}
