//! Lexigraph Storage Layer
//!
//! Persistent storage for ontology rows and the node-set indexes derived
//! from them, using RocksDB as the underlying storage engine. Every logical
//! table and index is one column family of a single database.
//!
//! # Architecture
//! - `db`: `LexiconDb`, the shared database handle and build markers
//! - `column_families`: column family names and descriptors
//! - `config`: `StorageConfig` tuning knobs
//! - `keys`: NUL-separated composite key encoding
//! - `serialization`: versioned bincode encoding of node sets
//! - `relational`: the six authoritative row tables and their queries
//! - `index_store`: Label Index and Part Index (key -> node set)
//! - `batch`: batched synced writes across column families
//! - `traits`: lookup seams consumed by the resolver
//!
//! # Example
//!
//! ```rust
//! use lexigraph_core::{Entry, Node};
//! use lexigraph_storage::{LexiconDb, RelationalStore};
//! use tempfile::TempDir;
//!
//! let tmp = TempDir::new().unwrap();
//! let db = LexiconDb::open_default(tmp.path()).unwrap();
//! let store = RelationalStore::new(db);
//!
//! store.insert_entry(&Entry::new("Moscow", "<Moscow>", "eng")).unwrap();
//! let nodes = store.label_to_nodes("moscow").unwrap().unwrap();
//! assert!(nodes.contains(&Node::new("<Moscow>")));
//! ```

pub mod batch;
pub mod column_families;
pub mod config;
pub mod db;
pub mod error;
pub mod index_store;
pub mod keys;
pub mod relational;
pub mod serialization;
pub mod traits;

pub use batch::{BatchStats, BatchWriter};
pub use column_families::{cf_names, get_column_family_descriptors, get_db_options};
pub use config::StorageConfig;
pub use db::LexiconDb;
pub use error::{StorageError, StorageResult};
pub use index_store::{IndexKind, NodeSetIndex};
pub use relational::{RelationalStore, RowBatch, TableCounts};
pub use traits::{NodeSetLookup, TaxonomyEdges};
