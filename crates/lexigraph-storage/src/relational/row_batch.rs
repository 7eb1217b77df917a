//! Bulk row loading for the relational tables.

use lexigraph_core::{ConceptRow, Entry, PartEntry, TaxonomyEdge};

use super::{concept_key, edge_row, entry_row, part_key};
use crate::batch::{BatchStats, BatchWriter};
use crate::column_families::cf_names;
use crate::db::LexiconDb;
use crate::error::StorageResult;
use crate::keys::encode_key;

/// Stages rows of any table and commits them in fixed-size batches.
///
/// Same idempotence as the single-row inserts: a row already present is
/// rewritten with the same key.
pub struct RowBatch<'a> {
    writer: BatchWriter<'a>,
}

impl<'a> RowBatch<'a> {
    pub(crate) fn new(db: &'a LexiconDb, batch_size: usize) -> StorageResult<Self> {
        Ok(Self {
            writer: BatchWriter::new(db, batch_size)?,
        })
    }

    pub fn entry(&mut self, entry: &Entry) -> StorageResult<()> {
        let (key, value) = entry_row(entry)?;
        self.writer.put(cf_names::LABEL_NODE, &key, &value)
    }

    pub fn part(&mut self, part: &PartEntry) -> StorageResult<()> {
        self.writer.put(cf_names::PART_NODE, &part_key(part)?, &[])
    }

    pub fn edge(&mut self, edge: &TaxonomyEdge) -> StorageResult<()> {
        let (cf_name, key) = edge_row(edge)?;
        self.writer.put(cf_name, &key, &[])
    }

    pub fn name(&mut self, name: &str) -> StorageResult<()> {
        self.writer.put(cf_names::NAMES, &encode_key(&[name])?, &[])
    }

    pub fn concept(&mut self, row: &ConceptRow) -> StorageResult<()> {
        self.writer.put(cf_names::CONCEPTS, &concept_key(row)?, &[])
    }

    /// Rows staged so far, committed or not.
    pub fn staged(&self) -> u64 {
        self.writer.stats().records_written + self.writer.pending() as u64
    }

    /// Commit the remaining rows.
    pub fn finish(self) -> StorageResult<BatchStats> {
        self.writer.finish()
    }
}
