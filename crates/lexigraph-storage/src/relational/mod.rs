//! Relational Store: the authoritative ontology rows.
//!
//! Six tables, each a column family whose key encodes the whole row (see
//! [`crate::keys`]). Key uniqueness is the uniqueness constraint, so every
//! insert is idempotent. Rows are only ever read back in key order, which
//! groups them by their first component.

mod row_batch;

pub use row_batch::RowBatch;

use std::collections::BTreeSet;

use lexigraph_core::{ConceptRelation, ConceptRow, Entry, Node, NodeSet, PartEntry, TaxonomyEdge};
use rocksdb::{Direction, IteratorMode};
use tracing::trace;

use crate::column_families::cf_names;
use crate::db::LexiconDb;
use crate::error::{StorageError, StorageResult};
use crate::keys::{decode_key, encode_key, encode_prefix, is_valid_component};
use crate::traits::TaxonomyEdges;

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub label_node: usize,
    pub part_node: usize,
    pub instance_class: usize,
    pub child_parent: usize,
    pub names: usize,
    pub concepts: usize,
}

impl TableCounts {
    pub fn total(&self) -> usize {
        self.label_node
            + self.part_node
            + self.instance_class
            + self.child_parent
            + self.names
            + self.concepts
    }
}

impl std::fmt::Display for TableCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "label_node={} part_node={} instance_class={} child_parent={} names={} concepts={}",
            self.label_node,
            self.part_node,
            self.instance_class,
            self.child_parent,
            self.names,
            self.concepts
        )
    }
}

pub(crate) fn entry_row(entry: &Entry) -> StorageResult<(Vec<u8>, Vec<u8>)> {
    let key = encode_key(&[&entry.label, entry.node.as_str()])?;
    Ok((key, entry.lang.as_bytes().to_vec()))
}

pub(crate) fn part_key(part: &PartEntry) -> StorageResult<Vec<u8>> {
    encode_key(&[&part.part, part.node.as_str()])
}

pub(crate) fn edge_row(edge: &TaxonomyEdge) -> StorageResult<(&'static str, Vec<u8>)> {
    match edge {
        TaxonomyEdge::InstanceOf { instance, class } => Ok((
            cf_names::INSTANCE_CLASS,
            encode_key(&[instance.as_str(), class.as_str()])?,
        )),
        TaxonomyEdge::Hierarchy { child, parent } => Ok((
            cf_names::CHILD_PARENT,
            encode_key(&[child.as_str(), parent.as_str()])?,
        )),
    }
}

pub(crate) fn concept_key(row: &ConceptRow) -> StorageResult<Vec<u8>> {
    let code = row.relation.code().to_string();
    encode_key(&[&row.form, &code, &row.concept, &row.pos])
}

/// Relational tables over a shared [`LexiconDb`].
#[derive(Debug, Clone)]
pub struct RelationalStore {
    db: LexiconDb,
}

impl RelationalStore {
    pub fn new(db: LexiconDb) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &LexiconDb {
        &self.db
    }

    /// Start a bulk load committing every `batch_size` rows.
    pub fn row_batch(&self, batch_size: usize) -> StorageResult<RowBatch<'_>> {
        RowBatch::new(&self.db, batch_size)
    }

    // ========== Inserts ==========

    pub fn insert_entry(&self, entry: &Entry) -> StorageResult<()> {
        let (key, value) = entry_row(entry)?;
        self.db.put(cf_names::LABEL_NODE, &key, &value)
    }

    pub fn insert_part(&self, part: &PartEntry) -> StorageResult<()> {
        self.db.put(cf_names::PART_NODE, &part_key(part)?, &[])
    }

    pub fn insert_instance_class(&self, instance: &Node, class: &Node) -> StorageResult<()> {
        self.insert_edge(&TaxonomyEdge::instance_of(instance.clone(), class.clone()))
    }

    pub fn insert_hierarchy(&self, child: &Node, parent: &Node) -> StorageResult<()> {
        self.insert_edge(&TaxonomyEdge::hierarchy(child.clone(), parent.clone()))
    }

    pub fn insert_edge(&self, edge: &TaxonomyEdge) -> StorageResult<()> {
        let (cf_name, key) = edge_row(edge)?;
        self.db.put(cf_name, &key, &[])
    }

    pub fn insert_name(&self, name: &str) -> StorageResult<()> {
        self.db.put(cf_names::NAMES, &encode_key(&[name])?, &[])
    }

    pub fn insert_concept(&self, row: &ConceptRow) -> StorageResult<()> {
        self.db.put(cf_names::CONCEPTS, &concept_key(row)?, &[])
    }

    // ========== Queries ==========

    /// Keys of `cf_name` starting with `prefix`, in key order.
    fn scan_prefix(&self, cf_name: &str, prefix: &[u8]) -> StorageResult<Vec<Box<[u8]>>> {
        let cf = self.db.cf(cf_name)?;
        let mut keys = Vec::new();
        for item in self
            .db
            .db
            .iterator_cf(cf, IteratorMode::From(prefix, Direction::Forward))
        {
            let (key, _) =
                item.map_err(|e| StorageError::ReadFailed(format!("{}: {}", cf_name, e)))?;
            if !key.starts_with(prefix) {
                break;
            }
            keys.push(key);
        }
        Ok(keys)
    }

    /// Second components of every `(first, second)` row with `first == head`.
    fn second_components(&self, cf_name: &str, head: &str) -> StorageResult<Vec<Node>> {
        if !is_valid_component(head) {
            return Ok(Vec::new());
        }
        let prefix = encode_prefix(&[head])?;
        self.scan_prefix(cf_name, &prefix)?
            .iter()
            .map(|key| {
                let mut parts = decode_key(key, 2, cf_name)?;
                Ok(Node::new(parts.swap_remove(1)))
            })
            .collect()
    }

    fn node_set(&self, cf_name: &str, head: &str) -> StorageResult<Option<NodeSet>> {
        let nodes: NodeSet = self.second_components(cf_name, head)?.into_iter().collect();
        trace!(table = cf_name, head, hits = nodes.len(), "relational lookup");
        Ok(if nodes.is_empty() { None } else { Some(nodes) })
    }

    /// Nodes carrying exactly `label`.
    pub fn label_to_nodes(&self, label: &str) -> StorageResult<Option<NodeSet>> {
        self.node_set(cf_names::LABEL_NODE, label)
    }

    /// Nodes whose labels contain the word `part`.
    pub fn part_to_nodes(&self, part: &str) -> StorageResult<Option<NodeSet>> {
        self.node_set(cf_names::PART_NODE, part)
    }

    /// Classes `instance` is directly typed as.
    pub fn instance_direct_classes(&self, instance: &Node) -> StorageResult<Option<NodeSet>> {
        self.node_set(cf_names::INSTANCE_CLASS, instance.as_str())
    }

    /// Direct parents of `child`, in key order.
    pub fn hierarchy_parents(&self, child: &Node) -> StorageResult<Vec<Node>> {
        self.second_components(cf_names::CHILD_PARENT, child.as_str())
    }

    pub fn is_name(&self, name: &str) -> StorageResult<bool> {
        if !is_valid_component(name) {
            return Ok(false);
        }
        Ok(self.db.get(cf_names::NAMES, name.as_bytes())?.is_some())
    }

    /// Concepts related to `form`, optionally restricted to one relation.
    pub fn find_concepts(
        &self,
        form: &str,
        relation: Option<ConceptRelation>,
    ) -> StorageResult<Option<BTreeSet<String>>> {
        if !is_valid_component(form) {
            return Ok(None);
        }
        let prefix = match relation {
            Some(relation) => encode_prefix(&[form, &relation.code().to_string()])?,
            None => encode_prefix(&[form])?,
        };
        let mut concepts = BTreeSet::new();
        for key in self.scan_prefix(cf_names::CONCEPTS, &prefix)? {
            let mut parts = decode_key(&key, 4, cf_names::CONCEPTS)?;
            concepts.insert(parts.swap_remove(2));
        }
        trace!(form, ?relation, hits = concepts.len(), "concept lookup");
        Ok(if concepts.is_empty() { None } else { Some(concepts) })
    }

    // ========== Iteration ==========

    fn pair_rows(
        &self,
        cf_name: &'static str,
    ) -> StorageResult<impl Iterator<Item = StorageResult<(String, Node)>> + '_> {
        let cf = self.db.cf(cf_name)?;
        let iter = self.db.db.iterator_cf(cf, IteratorMode::Start);

        Ok(iter.map(move |item| {
            let (key, _) =
                item.map_err(|e| StorageError::ReadFailed(format!("{}: {}", cf_name, e)))?;
            let mut parts = decode_key(&key, 2, cf_name)?;
            let node = Node::new(parts.swap_remove(1));
            let head = parts.swap_remove(0);
            Ok((head, node))
        }))
    }

    /// All `(label, node)` rows, ascending by label.
    pub fn label_rows(
        &self,
    ) -> StorageResult<impl Iterator<Item = StorageResult<(String, Node)>> + '_> {
        self.pair_rows(cf_names::LABEL_NODE)
    }

    /// All `(part, node)` rows, ascending by part.
    pub fn part_rows(&self) -> StorageResult<impl Iterator<Item = StorageResult<(String, Node)>> + '_> {
        self.pair_rows(cf_names::PART_NODE)
    }

    // ========== Statistics ==========

    fn count(&self, cf_name: &str) -> StorageResult<usize> {
        let cf = self.db.cf(cf_name)?;
        let mut count = 0;
        for item in self.db.db.iterator_cf(cf, IteratorMode::Start) {
            item.map_err(|e| StorageError::ReadFailed(format!("{}: {}", cf_name, e)))?;
            count += 1;
        }
        Ok(count)
    }

    /// Row counts per table (full scans; diagnostics only).
    pub fn table_counts(&self) -> StorageResult<TableCounts> {
        Ok(TableCounts {
            label_node: self.count(cf_names::LABEL_NODE)?,
            part_node: self.count(cf_names::PART_NODE)?,
            instance_class: self.count(cf_names::INSTANCE_CLASS)?,
            child_parent: self.count(cf_names::CHILD_PARENT)?,
            names: self.count(cf_names::NAMES)?,
            concepts: self.count(cf_names::CONCEPTS)?,
        })
    }

    /// Drop every `part_node` row (used before a Part Index rebuild).
    pub fn clear_parts(&self) -> StorageResult<()> {
        self.db.clear_cf(cf_names::PART_NODE)
    }
}

impl TaxonomyEdges for RelationalStore {
    fn direct_classes(&self, instance: &Node) -> StorageResult<Option<NodeSet>> {
        self.instance_direct_classes(instance)
    }

    fn parents(&self, child: &Node) -> StorageResult<Vec<Node>> {
        self.hierarchy_parents(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, RelationalStore) {
        let tmp = TempDir::new().unwrap();
        let db = LexiconDb::open_default(tmp.path()).unwrap();
        (tmp, RelationalStore::new(db))
    }

    #[test]
    fn test_label_lookup_groups_nodes() {
        let (_tmp, store) = store();
        store.insert_entry(&Entry::new("dog", "<wordnet_dog_102084071>", "eng")).unwrap();
        store.insert_entry(&Entry::new("Dog", "<Dog_(film)>", "eng")).unwrap();
        store.insert_entry(&Entry::new("dogma", "<Dogma>", "eng")).unwrap();

        let nodes = store.label_to_nodes("dog").unwrap().unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(!nodes.contains(&Node::new("<Dogma>")));
        assert!(store.label_to_nodes("cat").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_absorbed() {
        let (_tmp, store) = store();
        let entry = Entry::new("dog", "<wordnet_dog_102084071>", "eng");
        store.insert_entry(&entry).unwrap();
        store.insert_entry(&entry).unwrap();
        assert_eq!(store.table_counts().unwrap().label_node, 1);
    }

    #[test]
    fn test_nul_component_rejected() {
        let (_tmp, store) = store();
        let err = store.insert_entry(&Entry::new("bad\0", "<X>", "eng")).unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey { .. }));
        assert!(store.label_to_nodes("bad\0").unwrap().is_none());
    }

    #[test]
    fn test_taxonomy_edges() {
        let (_tmp, store) = store();
        let n1 = Node::new("<N1>");
        let c1 = Node::new("<wordnet_c1>");
        let c2 = Node::new("<wordnet_c2>");
        store.insert_instance_class(&n1, &c1).unwrap();
        store.insert_hierarchy(&c1, &c2).unwrap();

        assert_eq!(
            store.instance_direct_classes(&n1).unwrap(),
            Some([c1.clone()].into_iter().collect())
        );
        assert_eq!(store.hierarchy_parents(&c1).unwrap(), vec![c2.clone()]);
        assert!(store.hierarchy_parents(&c2).unwrap().is_empty());
        assert!(store.instance_direct_classes(&c1).unwrap().is_none());
    }

    #[test]
    fn test_names() {
        let (_tmp, store) = store();
        store.insert_name("Алексей").unwrap();
        assert!(store.is_name("Алексей").unwrap());
        assert!(!store.is_name("Алекс").unwrap());
        assert!(!store.is_name("a\0b").unwrap());
    }

    #[test]
    fn test_find_concepts_by_relation() {
        let (_tmp, store) = store();
        let row = |relation, concept: &str| ConceptRow {
            relation,
            concept: concept.to_string(),
            form: "лодка".to_string(),
            pos: "n".to_string(),
        };
        store.insert_concept(&row(ConceptRelation::Synonym, "чёлн")).unwrap();
        store.insert_concept(&row(ConceptRelation::DerivedFrom, "лод")).unwrap();

        let all = store.find_concepts("лодка", None).unwrap().unwrap();
        assert_eq!(all.len(), 2);
        let synonyms = store
            .find_concepts("лодка", Some(ConceptRelation::Synonym))
            .unwrap()
            .unwrap();
        assert_eq!(synonyms.into_iter().collect::<Vec<_>>(), vec!["чёлн"]);
        assert!(store
            .find_concepts("лодка", Some(ConceptRelation::ConceptuallyRelatedTo))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_label_rows_sorted_by_label() {
        let (_tmp, store) = store();
        for (label, node) in [("house", "<H>"), ("dog", "<D2>"), ("dog", "<D1>")] {
            store.insert_entry(&Entry::new(label, node, "eng")).unwrap();
        }
        let rows: Vec<(String, Node)> =
            store.label_rows().unwrap().collect::<StorageResult<_>>().unwrap();
        let labels: Vec<&str> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["dog", "dog", "house"]);
        assert_eq!(rows[0].1, Node::new("<D1>"));
    }
}
