//! Core `LexiconDb` handle and database lifecycle operations.
//!
//! # Architecture
//!
//! ```text
//! LexiconDb
//! └── Arc<DB> (RocksDB instance)
//!     ├── CF: label_node, part_node        - label/part rows
//!     ├── CF: instance_class, child_parent - taxonomy edges
//!     ├── CF: names, concepts              - auxiliary tables
//!     ├── CF: label_index, part_index      - derived node-set indexes
//!     └── CF: metadata                     - build completion markers
//! ```

use std::path::Path;
use std::sync::Arc;

use rocksdb::{ColumnFamily, WriteBatch, WriteOptions, DB};
use tracing::{debug, error, info, trace};

use crate::column_families::{cf_names, get_column_family_descriptors, get_db_options};
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};

/// Shared handle to the lexicon database.
///
/// Thread-safe via `Arc<DB>`. Clone is cheap (Arc clone), so the relational
/// store, both indexes and any number of resolvers can hold one each.
#[derive(Clone)]
pub struct LexiconDb {
    pub(crate) db: Arc<DB>,
    path: String,
    read_only: bool,
    sync_writes: bool,
}

impl LexiconDb {
    /// Open (creating if missing) the database at `path` for reading and writing.
    ///
    /// # Errors
    /// * `StorageError::InvalidConfig` - Invalid configuration
    /// * `StorageError::OpenFailed` - Path invalid, permission denied or lock held
    pub fn open<P: AsRef<Path>>(path: P, config: &StorageConfig) -> StorageResult<Self> {
        let path_str = path.as_ref().to_string_lossy().into_owned();
        let db_opts = get_db_options();
        let cf_descriptors = get_column_family_descriptors(config)?;

        let db = DB::open_cf_descriptors(&db_opts, &path_str, cf_descriptors).map_err(|e| {
            error!("Failed to open LexiconDb at {}: {}", path_str, e);
            StorageError::OpenFailed {
                path: path_str.clone(),
                message: e.to_string(),
            }
        })?;

        info!("LexiconDb opened at {}", path_str);

        Ok(Self {
            db: Arc::new(db),
            path: path_str,
            read_only: false,
            sync_writes: config.sync_writes,
        })
    }

    /// Open with default configuration.
    pub fn open_default<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::open(path, &StorageConfig::default())
    }

    /// Open an existing database read-only.
    ///
    /// Several processes may hold read-only handles on one built database.
    /// Writes through a read-only handle fail with `WriteFailed`.
    pub fn open_read_only<P: AsRef<Path>>(path: P, config: &StorageConfig) -> StorageResult<Self> {
        let path_str = path.as_ref().to_string_lossy().into_owned();
        let db_opts = get_db_options();
        let cf_descriptors = get_column_family_descriptors(config)?;

        let db = DB::open_cf_descriptors_read_only(&db_opts, &path_str, cf_descriptors, false)
            .map_err(|e| {
                error!("Failed to open LexiconDb read-only at {}: {}", path_str, e);
                StorageError::OpenFailed {
                    path: path_str.clone(),
                    message: e.to_string(),
                }
            })?;

        info!("LexiconDb opened read-only at {}", path_str);

        Ok(Self {
            db: Arc::new(db),
            path: path_str,
            read_only: true,
            sync_writes: false,
        })
    }

    /// Database directory.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Column family handle by name.
    pub fn cf(&self, name: &str) -> StorageResult<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound {
                name: name.to_string(),
            })
    }

    /// Verify every column family is reachable.
    pub fn health_check(&self) -> StorageResult<()> {
        for name in cf_names::ALL {
            self.cf(name)?;
        }
        Ok(())
    }

    /// Flush memtables of every column family to disk.
    pub fn flush_all(&self) -> StorageResult<()> {
        for name in cf_names::ALL {
            let cf = self.cf(name)?;
            self.db
                .flush_cf(cf)
                .map_err(|e| StorageError::FlushFailed(format!("{}: {}", name, e)))?;
        }
        debug!("Flushed all column families at {}", self.path);
        Ok(())
    }

    pub(crate) fn write_options(&self) -> WriteOptions {
        let mut opts = WriteOptions::default();
        opts.set_sync(self.sync_writes);
        opts
    }

    /// Single put honouring the configured sync mode.
    pub(crate) fn put(&self, cf_name: &str, key: &[u8], value: &[u8]) -> StorageResult<()> {
        let cf = self.cf(cf_name)?;
        self.db
            .put_cf_opt(cf, key, value, &self.write_options())
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", cf_name, e)))
    }

    pub(crate) fn get(&self, cf_name: &str, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        let cf = self.cf(cf_name)?;
        self.db
            .get_cf(cf, key)
            .map_err(|e| StorageError::ReadFailed(format!("{}: {}", cf_name, e)))
    }

    /// Commit a write batch honouring the configured sync mode.
    pub(crate) fn write(&self, batch: WriteBatch) -> StorageResult<()> {
        self.db
            .write_opt(batch, &self.write_options())
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }

    /// Remove every key of a column family.
    ///
    /// Keys are UTF-8, so no key starts with 0xFF and the range covers all.
    pub(crate) fn clear_cf(&self, cf_name: &str) -> StorageResult<()> {
        let cf = self.cf(cf_name)?;
        let from: &[u8] = &[];
        let to: &[u8] = &[0xFF];
        self.db
            .delete_range_cf(cf, from, to)
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", cf_name, e)))?;
        debug!("Cleared column family {}", cf_name);
        Ok(())
    }

    // ========== Build Markers ==========

    /// Record that a build finished, storing its record count.
    pub fn set_marker(&self, key: &str, records: u64) -> StorageResult<()> {
        self.put(cf_names::METADATA, key.as_bytes(), &records.to_le_bytes())?;
        debug!("set_marker: {} = {}", key, records);
        Ok(())
    }

    /// Remove a marker. Removing an absent marker is a no-op.
    pub fn clear_marker(&self, key: &str) -> StorageResult<()> {
        let cf = self.cf(cf_names::METADATA)?;
        self.db
            .delete_cf_opt(cf, key.as_bytes(), &self.write_options())
            .map_err(|e| StorageError::WriteFailed(format!("metadata/{}: {}", key, e)))?;
        debug!("clear_marker: {}", key);
        Ok(())
    }

    /// Record count stored with a marker, `None` when the marker is absent.
    ///
    /// # Errors
    /// * `StorageError::CorruptedData` - marker value is not 8 bytes
    pub fn marker(&self, key: &str) -> StorageResult<Option<u64>> {
        match self.get(cf_names::METADATA, key.as_bytes())? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    StorageError::corrupted(
                        format!("metadata/{}", key),
                        format!("expected 8 bytes, got {}", bytes.len()),
                    )
                })?;
                let records = u64::from_le_bytes(raw);
                trace!("marker: {} = {}", key, records);
                Ok(Some(records))
            }
            None => {
                trace!("marker: {} not set", key);
                Ok(None)
            }
        }
    }
}

impl std::fmt::Debug for LexiconDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexiconDb")
            .field("path", &self.path)
            .field("read_only", &self.read_only)
            .field("sync_writes", &self.sync_writes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_all_column_families() {
        let tmp = TempDir::new().unwrap();
        let db = LexiconDb::open_default(tmp.path()).unwrap();
        assert!(db.health_check().is_ok());
        assert!(!db.is_read_only());
        assert!(db.cf("no_such_cf").is_err());
    }

    #[test]
    fn test_marker_lifecycle() {
        let tmp = TempDir::new().unwrap();
        let db = LexiconDb::open_default(tmp.path()).unwrap();

        assert_eq!(db.marker("built:label_index").unwrap(), None);
        db.set_marker("built:label_index", 17).unwrap();
        assert_eq!(db.marker("built:label_index").unwrap(), Some(17));
        db.clear_marker("built:label_index").unwrap();
        assert_eq!(db.marker("built:label_index").unwrap(), None);
    }

    #[test]
    fn test_marker_wrong_length_is_corruption() {
        let tmp = TempDir::new().unwrap();
        let db = LexiconDb::open_default(tmp.path()).unwrap();
        db.put(cf_names::METADATA, b"built:part_index", b"abc").unwrap();
        let err = db.marker("built:part_index").unwrap_err();
        assert!(matches!(err, StorageError::CorruptedData { .. }));
    }

    #[test]
    fn test_read_only_open_sees_data_and_rejects_writes() {
        let tmp = TempDir::new().unwrap();
        {
            let db = LexiconDb::open_default(tmp.path()).unwrap();
            db.set_marker("built:label_index", 3).unwrap();
            db.flush_all().unwrap();
        }
        let ro = LexiconDb::open_read_only(tmp.path(), &StorageConfig::default()).unwrap();
        assert!(ro.is_read_only());
        assert_eq!(ro.marker("built:label_index").unwrap(), Some(3));
        assert!(ro.set_marker("built:label_index", 4).is_err());
    }

    #[test]
    fn test_read_only_open_missing_db_fails() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("absent");
        let err = LexiconDb::open_read_only(&missing, &StorageConfig::default()).unwrap_err();
        assert!(matches!(err, StorageError::OpenFailed { .. }));
    }

    #[test]
    fn test_clear_cf_removes_everything() {
        let tmp = TempDir::new().unwrap();
        let db = LexiconDb::open_default(tmp.path()).unwrap();
        db.put(cf_names::LABEL_INDEX, "собака".as_bytes(), b"x").unwrap();
        db.put(cf_names::LABEL_INDEX, b"dog", b"x").unwrap();
        db.clear_cf(cf_names::LABEL_INDEX).unwrap();
        assert!(db.get(cf_names::LABEL_INDEX, b"dog").unwrap().is_none());
        assert!(db.get(cf_names::LABEL_INDEX, "собака".as_bytes()).unwrap().is_none());
    }
}
