//! Subcommand handlers.

pub mod annotate;
pub mod build;
pub mod classes;
pub mod ingest;
pub mod lookup;
pub mod resolve;
pub mod stats;

use anyhow::{Context, Result};
use lexigraph_core::NodeSet;
use lexigraph_resolver::Resolver;
use lexigraph_storage::LexiconDb;

use crate::config::AppConfig;

/// Open the configured database for writing.
pub(crate) fn open_writable(config: &AppConfig) -> Result<LexiconDb> {
    LexiconDb::open(&config.db_path, &config.storage)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))
}

/// Open the configured database read-only and wrap it in a resolver.
pub(crate) fn open_resolver(config: &AppConfig) -> Result<Resolver> {
    let db = LexiconDb::open_read_only(&config.db_path, &config.storage)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    Resolver::open(db).context("database is not ready for queries")
}

/// `{n1;n2}`, `{}` when empty.
pub fn format_node_set(nodes: &NodeSet) -> String {
    let joined: Vec<&str> = nodes.iter().map(|node| node.as_str()).collect();
    format!("{{{}}}", joined.join(";"))
}

#[cfg(test)]
pub(crate) mod testing {
    use lexigraph_core::{Entry, TaxonomyEdge};
    use lexigraph_resolver::{Indexer, IndexerConfig, Resolver};
    use lexigraph_storage::{LexiconDb, RelationalStore, StorageConfig};
    use tempfile::TempDir;

    /// Small built database:
    /// `<Vladimir_Putin>` (instance of `<wordnet_president_110467179>`),
    /// `<Moscow>` (instance of `<wordnet_city_108524735>`) and the class
    /// `<wordnet_president_110467179>` under `<wordnet_person_100007846>`.
    pub(crate) fn built_resolver() -> (TempDir, Resolver) {
        let tmp = TempDir::new().unwrap();
        let db = LexiconDb::open(tmp.path(), &StorageConfig::default()).unwrap();
        let store = RelationalStore::new(db.clone());
        for entry in [
            Entry::new("vladimir putin", "<Vladimir_Putin>", "eng"),
            Entry::new("putin", "<Vladimir_Putin>", "eng"),
            Entry::new("moscow", "<Moscow>", "eng"),
            Entry::new("president", "<wordnet_president_110467179>", "eng"),
        ] {
            store.insert_entry(&entry).unwrap();
        }
        for edge in [
            TaxonomyEdge::instance_of("<Vladimir_Putin>", "<wordnet_president_110467179>"),
            TaxonomyEdge::instance_of("<Moscow>", "<wordnet_city_108524735>"),
            TaxonomyEdge::hierarchy("<wordnet_president_110467179>", "<wordnet_person_100007846>"),
        ] {
            store.insert_edge(&edge).unwrap();
        }
        Indexer::new(store, IndexerConfig::default())
            .unwrap()
            .build_all()
            .unwrap();
        let resolver = Resolver::open(db).unwrap();
        (tmp, resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexigraph_core::Node;

    #[test]
    fn test_format_node_set() {
        assert_eq!(format_node_set(&NodeSet::new()), "{}");
        let nodes: NodeSet = [Node::new("<b>"), Node::new("<a>")].into_iter().collect();
        assert_eq!(format_node_set(&nodes), "{<a>;<b>}");
    }
}
