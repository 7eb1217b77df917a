//! Node-set value encoding for the index column families.
//!
//! Format: one version byte, then the bincode encoding of the sorted node
//! list. Unknown versions are reported as corrupted data rather than
//! guessed at.

use lexigraph_core::NodeSet;

use crate::error::{StorageError, StorageResult};

/// Current node-set encoding version.
pub const NODE_SET_VERSION: u8 = 1;

/// Encode a node set.
pub fn serialize_node_set(set: &NodeSet) -> StorageResult<Vec<u8>> {
    let body = bincode::serialize(set).map_err(|e| StorageError::Serialization(e.to_string()))?;
    let mut bytes = Vec::with_capacity(body.len() + 1);
    bytes.push(NODE_SET_VERSION);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Decode a node set written by [`serialize_node_set`].
///
/// `location` names the key for error reporting.
pub fn deserialize_node_set(bytes: &[u8], location: &str) -> StorageResult<NodeSet> {
    let (version, body) = bytes
        .split_first()
        .ok_or_else(|| StorageError::corrupted(location, "empty value"))?;
    if *version != NODE_SET_VERSION {
        return Err(StorageError::corrupted(
            location,
            format!(
                "unknown node set version {} (expected {})",
                version, NODE_SET_VERSION
            ),
        ));
    }
    bincode::deserialize(body).map_err(|e| StorageError::corrupted(location, e.to_string()))
}
