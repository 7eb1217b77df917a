//! Ontology node identifiers and the class/instance classification.
//!
//! A node is an opaque string such as `<wordnet_dog_102084071>` or
//! `<Tim_Story>`. Whether it is a class or an instance is decided by the
//! textual namespace prefix alone; [`NodeKind::of`] is the single place that
//! convention lives.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Textual prefix of class-namespace node identifiers.
pub const CLASS_PREFIX: &str = "<wordnet";

/// Ordered set of nodes.
///
/// Ordered so that stored index values, CLI output and tie-breaks over set
/// members are deterministic.
pub type NodeSet = BTreeSet<Node>;

/// Class or instance, derived from the node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Node in the class namespace (is-a hierarchy member).
    Class,
    /// Any other node.
    Instance,
}

impl NodeKind {
    /// Classify a raw node identifier.
    #[inline]
    pub fn of(id: &str) -> Self {
        if id.starts_with(CLASS_PREFIX) {
            NodeKind::Class
        } else {
            NodeKind::Instance
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Class => write!(f, "class"),
            NodeKind::Instance => write!(f, "instance"),
        }
    }
}

/// Opaque ontology entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(String);

impl Node {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the identifier text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Class or instance.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        NodeKind::of(&self.0)
    }

    /// Shorthand for `kind() == NodeKind::Class`.
    #[inline]
    pub fn is_class(&self) -> bool {
        self.kind() == NodeKind::Class
    }

    /// Number of underscore-delimited segments in the identifier.
    ///
    /// `<Vladimir_Putin>` has 2, `<Putin>` has 1. Used as the shortest-name
    /// heuristic when a single instance has to be picked.
    pub fn name_segments(&self) -> usize {
        self.0.split('_').count()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Node {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Node {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for Node {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Node {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_prefix_classification() {
        assert_eq!(NodeKind::of("<wordnet_dog_102084071>"), NodeKind::Class);
        assert_eq!(NodeKind::of("<wikicategory_Dogs>"), NodeKind::Instance);
        assert_eq!(NodeKind::of("<Tim_Story>"), NodeKind::Instance);
        assert_eq!(NodeKind::of(""), NodeKind::Instance);
    }

    #[test]
    fn test_prefix_must_be_leading() {
        assert_eq!(NodeKind::of("x<wordnet_dog>"), NodeKind::Instance);
    }

    #[test]
    fn test_node_kind_and_is_class() {
        let class = Node::new("<wordnet_city_108524735>");
        let instance = Node::from("<Moscow>");
        assert!(class.is_class());
        assert_eq!(instance.kind(), NodeKind::Instance);
        assert!(!instance.is_class());
    }

    #[test]
    fn test_name_segments() {
        assert_eq!(Node::from("<Putin>").name_segments(), 1);
        assert_eq!(Node::from("<Vladimir_Putin>").name_segments(), 2);
        assert_eq!(Node::from("<Vladimir_Vladimirovich_Putin>").name_segments(), 3);
    }

    #[test]
    fn test_node_set_lookup_by_str() {
        let set: NodeSet = ["<A>", "<B>"].into_iter().map(Node::from).collect();
        assert!(set.contains("<A>"));
        assert!(!set.contains("<C>"));
    }

    #[test]
    fn test_node_set_is_ordered() {
        let set: NodeSet = ["<b>", "<a>", "<c>"].into_iter().map(Node::from).collect();
        let ordered: Vec<&str> = set.iter().map(Node::as_str).collect();
        assert_eq!(ordered, vec!["<a>", "<b>", "<c>"]);
    }

    #[test]
    fn test_node_serializes_as_plain_string() {
        let node = Node::from("<Moscow>");
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, "\"<Moscow>\"");
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_node_kind_display() {
        assert_eq!(NodeKind::Class.to_string(), "class");
        assert_eq!(NodeKind::Instance.to_string(), "instance");
    }
}
