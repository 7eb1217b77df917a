//! Batched writes across column families.
//!
//! Records accumulate in a RocksDB `WriteBatch` and are committed every
//! `batch_size` records, plus once more on [`BatchWriter::finish`]. Each
//! commit is a synced write when the database was opened with
//! `sync_writes`, so a committed batch survives a crash.
//!
//! Callers that stage one record per logical group (the index builders) get
//! batches that never split a group.

use rocksdb::WriteBatch;
use tracing::{debug, trace};

use crate::db::LexiconDb;
use crate::error::{StorageError, StorageResult};

/// Counters reported by a finished [`BatchWriter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Records staged and committed.
    pub records_written: u64,
    /// Non-empty batches committed.
    pub batches_flushed: u64,
}

/// Accumulates puts and commits them in fixed-size batches.
///
/// Staged records that were never flushed are lost if the writer is dropped
/// without calling [`finish`](Self::finish).
pub struct BatchWriter<'a> {
    db: &'a LexiconDb,
    batch: WriteBatch,
    pending: usize,
    batch_size: usize,
    stats: BatchStats,
}

impl<'a> BatchWriter<'a> {
    /// Create a writer committing every `batch_size` records.
    ///
    /// # Errors
    /// * `StorageError::InvalidConfig` - `batch_size` is zero
    pub fn new(db: &'a LexiconDb, batch_size: usize) -> StorageResult<Self> {
        if batch_size == 0 {
            return Err(StorageError::InvalidConfig(
                "batch_size must be >= 1, got 0".to_string(),
            ));
        }
        Ok(Self {
            db,
            batch: WriteBatch::default(),
            pending: 0,
            batch_size,
            stats: BatchStats::default(),
        })
    }

    /// Stage one record, committing the batch once it is full.
    pub fn put(&mut self, cf_name: &str, key: &[u8], value: &[u8]) -> StorageResult<()> {
        let cf = self.db.cf(cf_name)?;
        self.batch.put_cf(cf, key, value);
        self.pending += 1;
        trace!(cf = cf_name, pending = self.pending, "staged record");

        if self.pending >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Records staged since the last commit.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Counters so far.
    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    /// Commit staged records. A no-op when nothing is staged.
    pub fn flush(&mut self) -> StorageResult<()> {
        if self.pending == 0 {
            return Ok(());
        }
        let batch = std::mem::take(&mut self.batch);
        self.db.write(batch)?;

        self.stats.records_written += self.pending as u64;
        self.stats.batches_flushed += 1;
        debug!(
            records = self.pending,
            batches = self.stats.batches_flushed,
            "flushed write batch"
        );
        self.pending = 0;
        Ok(())
    }

    /// Commit the final partial batch and return the counters.
    pub fn finish(mut self) -> StorageResult<BatchStats> {
        self.flush()?;
        Ok(self.stats)
    }
}
