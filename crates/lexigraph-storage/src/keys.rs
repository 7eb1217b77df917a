//! Composite key encoding.
//!
//! Relational rows are stored entirely in the key: components are UTF-8
//! strings joined by a NUL byte. RocksDB's byte-wise key order then sorts
//! rows by their first component, so all rows sharing a label (or part,
//! instance, child, form) are contiguous and reachable with a prefix scan.
//!
//! NUL is reserved. A component containing it is rejected on write and can
//! never match on read.

use crate::error::{StorageError, StorageResult};

/// Separator between key components.
pub const KEY_SEPARATOR: u8 = 0;

/// True when `component` can be part of a key.
#[inline]
pub fn is_valid_component(component: &str) -> bool {
    !component.as_bytes().contains(&KEY_SEPARATOR)
}

fn check_component(component: &str) -> StorageResult<()> {
    if is_valid_component(component) {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            component: component.to_string(),
            reason: "contains reserved NUL separator".to_string(),
        })
    }
}

/// Join components into a key.
///
/// # Errors
///
/// `StorageError::InvalidKey` if any component contains NUL.
pub fn encode_key(components: &[&str]) -> StorageResult<Vec<u8>> {
    let capacity = components.iter().map(|c| c.len() + 1).sum();
    let mut key = Vec::with_capacity(capacity);
    for (i, component) in components.iter().enumerate() {
        check_component(component)?;
        if i > 0 {
            key.push(KEY_SEPARATOR);
        }
        key.extend_from_slice(component.as_bytes());
    }
    Ok(key)
}

/// Prefix matching every key whose leading components are `components`.
///
/// The trailing separator keeps `dog` from matching `dogma\0...`.
pub fn encode_prefix(components: &[&str]) -> StorageResult<Vec<u8>> {
    let mut prefix = encode_key(components)?;
    prefix.push(KEY_SEPARATOR);
    Ok(prefix)
}

/// Split a stored key back into exactly `arity` components.
///
/// # Errors
///
/// `StorageError::CorruptedData` on wrong arity or invalid UTF-8.
pub fn decode_key(key: &[u8], arity: usize, location: &str) -> StorageResult<Vec<String>> {
    let components: Vec<&[u8]> = key.split(|b| *b == KEY_SEPARATOR).collect();
    if components.len() != arity {
        return Err(StorageError::corrupted(
            location,
            format!("expected {} key components, got {}", arity, components.len()),
        ));
    }
    components
        .into_iter()
        .map(|bytes| {
            std::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|e| StorageError::corrupted(location, e.to_string()))
        })
        .collect()
}
