//! Lookup seams consumed by the resolver.
//!
//! The compound resolver and the taxonomy closure only need these two
//! read paths. `NodeSetIndex` and `RelationalStore` implement them over
//! RocksDB; anything else that can answer them (an in-memory fixture, a
//! cache) can stand in.

use lexigraph_core::{Node, NodeSet};

use crate::error::StorageResult;

/// Key -> node set lookup (Label Index, Part Index).
pub trait NodeSetLookup {
    /// Node set stored under `key`. `Ok(None)` when absent; never `Some(empty)`.
    fn lookup(&self, key: &str) -> StorageResult<Option<NodeSet>>;
}

/// Directed taxonomy edges.
pub trait TaxonomyEdges {
    /// Classes `instance` is directly an instance of. `Ok(None)` when none.
    fn direct_classes(&self, instance: &Node) -> StorageResult<Option<NodeSet>>;

    /// Direct parents of `child` in the class hierarchy (possibly empty).
    fn parents(&self, child: &Node) -> StorageResult<Vec<Node>>;
}

impl<T: NodeSetLookup + ?Sized> NodeSetLookup for &T {
    fn lookup(&self, key: &str) -> StorageResult<Option<NodeSet>> {
        (**self).lookup(key)
    }
}

impl<T: TaxonomyEdges + ?Sized> TaxonomyEdges for &T {
    fn direct_classes(&self, instance: &Node) -> StorageResult<Option<NodeSet>> {
        (**self).direct_classes(instance)
    }

    fn parents(&self, child: &Node) -> StorageResult<Vec<Node>> {
        (**self).parents(child)
    }
}
