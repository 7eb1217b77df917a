//! Lexigraph Resolver
//!
//! Builds the Label and Part indexes from the relational store and answers
//! resolution queries against them.
//!
//! # Architecture
//! - `indexer`: grouped-fold index builds with completion markers
//! - `taxonomy`: direct classes, ancestor closure, instance expansion
//! - `compound`: multi-lemma resolution (intersection and best-combination)
//! - `resolver`: `Resolver` facade used by annotation drivers
//! - `config`: `IndexerConfig`, `CompoundConfig`, `CompoundQuery`
//!
//! # Example
//!
//! ```rust
//! use lexigraph_core::{Entry, Node};
//! use lexigraph_resolver::{Indexer, IndexerConfig, Resolver};
//! use lexigraph_storage::{LexiconDb, RelationalStore};
//! use tempfile::TempDir;
//!
//! let tmp = TempDir::new().unwrap();
//! let db = LexiconDb::open_default(tmp.path()).unwrap();
//! let store = RelationalStore::new(db.clone());
//! store.insert_entry(&Entry::new("hot dog", "<wordnet_hotdog_107697537>", "eng")).unwrap();
//!
//! Indexer::new(store, IndexerConfig::default()).unwrap().build_all().unwrap();
//!
//! let resolver = Resolver::open(db).unwrap();
//! let nodes = resolver.resolve_compound(&["hot", "dog"]).unwrap().unwrap();
//! assert!(nodes.contains(&Node::new("<wordnet_hotdog_107697537>")));
//! ```

pub mod compound;
pub mod config;
pub mod error;
pub mod indexer;
pub mod resolver;
pub mod taxonomy;

pub use compound::{find_compound, find_compound_best, idx_map_compound};
pub use config::{CompoundConfig, CompoundQuery, IndexerConfig, DEFAULT_BATCH_SIZE, MAX_COMBINATION_LEN};
pub use error::{ResolverError, ResolverResult};
pub use indexer::{BuildReport, Indexer};
pub use resolver::Resolver;
