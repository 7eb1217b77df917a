//! Label Index and Part Index.
//!
//! Both map a string key to a non-empty node set. They are derived from the
//! relational tables by the indexer and are read-only while queries run.
//! An absent key means "no match"; an empty set is never stored.

use lexigraph_core::NodeSet;
use rocksdb::IteratorMode;
use tracing::trace;

use crate::batch::BatchWriter;
use crate::column_families::cf_names;
use crate::db::LexiconDb;
use crate::error::{StorageError, StorageResult};
use crate::keys::is_valid_component;
use crate::serialization::{deserialize_node_set, serialize_node_set};
use crate::traits::NodeSetLookup;

/// Which derived index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Full lowercase label -> nodes.
    Label,
    /// Single label word -> nodes.
    Part,
}

impl IndexKind {
    pub const ALL: [IndexKind; 2] = [IndexKind::Label, IndexKind::Part];

    /// Column family holding the index.
    pub fn cf_name(self) -> &'static str {
        match self {
            IndexKind::Label => cf_names::LABEL_INDEX,
            IndexKind::Part => cf_names::PART_INDEX,
        }
    }

    /// Relational table the index is folded from.
    pub fn source_cf_name(self) -> &'static str {
        match self {
            IndexKind::Label => cf_names::LABEL_NODE,
            IndexKind::Part => cf_names::PART_NODE,
        }
    }

    /// Metadata key of the build completion marker.
    pub fn marker_key(self) -> &'static str {
        match self {
            IndexKind::Label => "built:label_index",
            IndexKind::Part => "built:part_index",
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Label => write!(f, "label index"),
            IndexKind::Part => write!(f, "part index"),
        }
    }
}

/// Handle to one node-set index.
#[derive(Debug, Clone)]
pub struct NodeSetIndex {
    db: LexiconDb,
    kind: IndexKind,
}

impl NodeSetIndex {
    pub fn new(db: LexiconDb, kind: IndexKind) -> Self {
        Self { db, kind }
    }

    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    pub fn db(&self) -> &LexiconDb {
        &self.db
    }

    /// Node set under `key`, `None` when absent.
    pub fn get(&self, key: &str) -> StorageResult<Option<NodeSet>> {
        if !is_valid_component(key) {
            return Ok(None);
        }
        let cf_name = self.kind.cf_name();
        let value = self.db.get(cf_name, key.as_bytes())?;
        let result = match value {
            Some(bytes) => Some(deserialize_node_set(&bytes, &format!("{}/{}", cf_name, key))?),
            None => None,
        };
        trace!(
            index = cf_name,
            key,
            hits = result.as_ref().map_or(0, |s| s.len()),
            "index lookup"
        );
        Ok(result)
    }

    /// Store `set` under `key` immediately.
    ///
    /// Returns `false` without writing when `set` is empty.
    pub fn put(&self, key: &str, set: &NodeSet) -> StorageResult<bool> {
        if set.is_empty() {
            return Ok(false);
        }
        let value = self.encode(key, set)?;
        self.db.put(self.kind.cf_name(), key.as_bytes(), &value)?;
        Ok(true)
    }

    /// Stage `set` under `key` in a batch writer.
    ///
    /// Returns `false` without staging when `set` is empty.
    pub fn stage(&self, writer: &mut BatchWriter<'_>, key: &str, set: &NodeSet) -> StorageResult<bool> {
        if set.is_empty() {
            return Ok(false);
        }
        let value = self.encode(key, set)?;
        writer.put(self.kind.cf_name(), key.as_bytes(), &value)?;
        Ok(true)
    }

    fn encode(&self, key: &str, set: &NodeSet) -> StorageResult<Vec<u8>> {
        if !is_valid_component(key) {
            return Err(StorageError::InvalidKey {
                component: key.to_string(),
                reason: "contains reserved NUL separator".to_string(),
            });
        }
        serialize_node_set(set)
    }

    /// Drop every record (used before a rebuild).
    pub fn clear(&self) -> StorageResult<()> {
        self.db.clear_cf(self.kind.cf_name())
    }

    /// Number of keys stored.
    pub fn len(&self) -> StorageResult<usize> {
        let cf = self.db.cf(self.kind.cf_name())?;
        let mut count = 0;
        for item in self.db.db.iterator_cf(cf, IteratorMode::Start) {
            item.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            count += 1;
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl NodeSetLookup for NodeSetIndex {
    fn lookup(&self, key: &str) -> StorageResult<Option<NodeSet>> {
        self.get(key)
    }
}
