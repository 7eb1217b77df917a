//! Shared fixtures: a real database in a temporary directory.

#![allow(dead_code)]

use lexigraph_core::{Entry, Node, NodeSet};
use lexigraph_resolver::{BuildReport, Indexer, IndexerConfig, Resolver};
use lexigraph_storage::{LexiconDb, RelationalStore};
use tempfile::TempDir;

pub struct Fixture {
    pub tmp: TempDir,
    pub db: LexiconDb,
    pub store: RelationalStore,
}

impl Fixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let db = LexiconDb::open_default(tmp.path()).expect("open db");
        let store = RelationalStore::new(db.clone());
        Self { tmp, db, store }
    }

    pub fn label(self, label: &str, node: &str) -> Self {
        self.store
            .insert_entry(&Entry::new(label, node, "eng"))
            .expect("insert entry");
        self
    }

    pub fn instance_of(self, instance: &str, class: &str) -> Self {
        self.store
            .insert_instance_class(&Node::new(instance), &Node::new(class))
            .expect("insert instance_class");
        self
    }

    pub fn parent(self, child: &str, parent: &str) -> Self {
        self.store
            .insert_hierarchy(&Node::new(child), &Node::new(parent))
            .expect("insert hierarchy");
        self
    }

    pub fn build_with(&self, batch_size: usize) -> Vec<BuildReport> {
        Indexer::new(self.store.clone(), IndexerConfig { batch_size })
            .expect("indexer")
            .build_all()
            .expect("build")
    }

    /// Build both indexes and open a resolver.
    pub fn resolver(&self) -> Resolver {
        self.build_with(100_000);
        Resolver::open(self.db.clone()).expect("resolver")
    }
}

pub fn set(ids: &[&str]) -> NodeSet {
    ids.iter().map(|id| Node::new(*id)).collect()
}
