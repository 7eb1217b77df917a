//! Index builds: relational rows -> Label Index and Part Index.
//!
//! Both builds are a grouped fold over key-sorted rows, one index record per
//! distinct key, written through a [`BatchWriter`]. Each build clears its
//! completion marker first and sets it after the final flush, so a resolver
//! never opens against a half-written index. Re-running a build is safe.

mod grouping;

pub use grouping::GroupedRows;

use std::fmt;
use std::time::{Duration, Instant};

use lexigraph_core::{label_parts, Node, PartEntry};
use lexigraph_storage::{BatchWriter, IndexKind, NodeSetIndex, RelationalStore, StorageResult};
use tracing::{debug, info};

use crate::config::IndexerConfig;
use crate::error::ResolverResult;

/// Outcome of one index build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub index: IndexKind,
    /// Relational rows folded into the index.
    pub rows_read: u64,
    /// Rows derived before folding (`part_node` rows for the Part Index).
    pub rows_derived: u64,
    /// Index records written (distinct keys).
    pub records_written: u64,
    pub batches_flushed: u64,
    pub elapsed: Duration,
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} rows -> {} records in {} batches ({:.2?})",
            self.index, self.rows_read, self.records_written, self.batches_flushed, self.elapsed
        )?;
        if self.rows_derived > 0 {
            write!(f, ", {} rows derived", self.rows_derived)?;
        }
        Ok(())
    }
}

/// Builds the derived indexes of one database.
pub struct Indexer {
    store: RelationalStore,
    config: IndexerConfig,
}

impl Indexer {
    /// # Errors
    /// * `ResolverError::InvalidConfig` - `batch_size` is zero
    pub fn new(store: RelationalStore, config: IndexerConfig) -> ResolverResult<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Build the Label Index, then the Part Index.
    pub fn build_all(&self) -> ResolverResult<Vec<BuildReport>> {
        Ok(vec![self.build_label_index()?, self.build_part_index()?])
    }

    /// Fold `label_node` rows into the Label Index.
    pub fn build_label_index(&self) -> ResolverResult<BuildReport> {
        let start = Instant::now();
        self.begin(IndexKind::Label)?;
        let rows = self.store.label_rows()?;
        self.fold(IndexKind::Label, rows, 0, start)
    }

    /// Regenerate `part_node` rows from every label, then fold them into
    /// the Part Index.
    pub fn build_part_index(&self) -> ResolverResult<BuildReport> {
        let start = Instant::now();
        self.begin(IndexKind::Part)?;
        let derived = self.populate_parts()?;
        let rows = self.store.part_rows()?;
        self.fold(IndexKind::Part, rows, derived, start)
    }

    /// Write one `part_node` row per word of every label.
    ///
    /// Returns the number of rows staged. Duplicates collapse in the table.
    pub fn populate_parts(&self) -> ResolverResult<u64> {
        self.store.clear_parts()?;
        let mut batch = self.store.row_batch(self.config.batch_size)?;
        for row in self.store.label_rows()? {
            let (label, node) = row?;
            for part in label_parts(&label) {
                batch.part(&PartEntry::new(part, node.clone()))?;
            }
        }
        let staged = batch.staged();
        let stats = batch.finish()?;
        info!(
            rows = staged,
            batches = stats.batches_flushed,
            "part rows populated"
        );
        Ok(staged)
    }

    fn begin(&self, kind: IndexKind) -> ResolverResult<()> {
        let db = self.store.db();
        db.clear_marker(kind.marker_key())?;
        NodeSetIndex::new(db.clone(), kind).clear()?;
        info!(index = %kind, batch_size = self.config.batch_size, "index build started");
        Ok(())
    }

    fn fold<I>(&self, kind: IndexKind, rows: I, rows_derived: u64, start: Instant) -> ResolverResult<BuildReport>
    where
        I: Iterator<Item = StorageResult<(String, Node)>>,
    {
        let db = self.store.db();
        let index = NodeSetIndex::new(db.clone(), kind);
        let mut writer = BatchWriter::new(db, self.config.batch_size)?;
        let mut groups = GroupedRows::new(rows);

        for group in groups.by_ref() {
            let (key, nodes) = group?;
            index.stage(&mut writer, &key, &nodes)?;
        }
        let rows_read = groups.rows_read();
        let stats = writer.finish()?;

        db.set_marker(kind.marker_key(), stats.records_written)?;

        let report = BuildReport {
            index: kind,
            rows_read,
            rows_derived,
            records_written: stats.records_written,
            batches_flushed: stats.batches_flushed,
            elapsed: start.elapsed(),
        };
        info!(%report, "index build finished");
        debug!(marker = kind.marker_key(), "completion marker set");
        Ok(report)
    }
}
