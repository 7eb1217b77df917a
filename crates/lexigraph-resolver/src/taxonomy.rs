//! Taxonomy closure over the instance-of and child-parent edge tables.
//!
//! Edges are read straight from the relational store on every call. The
//! hierarchy may contain cycles; the closure tracks visited nodes so it
//! always terminates.

use std::collections::VecDeque;

use lexigraph_core::{Node, NodeKind, NodeSet};
use lexigraph_storage::{StorageResult, TaxonomyEdges};
use tracing::{debug, trace};

/// Classes `instance` is directly an instance of (single hop).
pub fn direct_classes<T: TaxonomyEdges + ?Sized>(
    edges: &T,
    instance: &Node,
) -> StorageResult<Option<NodeSet>> {
    edges.direct_classes(instance)
}

/// `node` plus every ancestor reachable over child -> parent edges.
///
/// Breadth-first, no depth limit. For the cycle A -> B -> A the result is
/// {A, B}.
pub fn ancestor_closure<T: TaxonomyEdges + ?Sized>(edges: &T, node: &Node) -> StorageResult<NodeSet> {
    let mut visited = NodeSet::new();
    let mut frontier: VecDeque<Node> = VecDeque::new();

    visited.insert(node.clone());
    frontier.push_back(node.clone());

    while let Some(current) = frontier.pop_front() {
        for parent in edges.parents(&current)? {
            if visited.contains(&parent) {
                continue;
            }
            visited.insert(parent.clone());
            frontier.push_back(parent);
        }
    }

    debug!(node = %node, ancestors = visited.len() - 1, "ancestor closure");
    Ok(visited)
}

/// Replace instances by their direct classes.
///
/// Classes pass through unchanged. Instances without a class are dropped.
/// One hop only: the classes found are not expanded further.
pub fn expand_to_classes<T: TaxonomyEdges + ?Sized>(
    edges: &T,
    nodes: &NodeSet,
) -> StorageResult<NodeSet> {
    let mut expanded = NodeSet::new();
    for node in nodes {
        match node.kind() {
            NodeKind::Class => {
                expanded.insert(node.clone());
            }
            NodeKind::Instance => {
                if let Some(classes) = edges.direct_classes(node)? {
                    expanded.extend(classes);
                } else {
                    trace!(node = %node, "instance without class dropped");
                }
            }
        }
    }
    Ok(expanded)
}
