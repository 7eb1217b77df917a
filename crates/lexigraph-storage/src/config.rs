//! Storage configuration.
//!
//! Tuning knobs for the RocksDB backend with validation and presets for the
//! two phases of a run: bulk ingestion/index builds and read-only querying.

use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Configuration for the lexicon database.
///
/// All parameters are validated before use via `validate()`.
/// Invalid configurations fail fast with `StorageError::InvalidConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Block cache size in bytes (default: 512MB).
    /// Shared across all column families.
    pub block_cache_size: usize,

    /// Enable LZ4 compression (default: true).
    pub enable_compression: bool,

    /// Bloom filter bits per key (default: 10).
    pub bloom_filter_bits: i32,

    /// Write buffer size in bytes (default: 64MB).
    pub write_buffer_size: usize,

    /// Max write buffers (default: 3).
    pub max_write_buffers: i32,

    /// Target file size base in bytes (default: 64MB).
    pub target_file_size_base: u64,

    /// Sync the WAL on every write batch (default: true).
    ///
    /// Index build flushes rely on this to survive a crash.
    pub sync_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            block_cache_size: 512 * 1024 * 1024, // 512MB
            enable_compression: true,
            bloom_filter_bits: 10,
            write_buffer_size: 64 * 1024 * 1024, // 64MB
            max_write_buffers: 3,
            target_file_size_base: 64 * 1024 * 1024, // 64MB
            sync_writes: true,
        }
    }
}

impl StorageConfig {
    /// Config for the query phase.
    ///
    /// - Larger block cache (1GB)
    /// - Higher bloom filter bits (14) for cheap negative lookups
    #[must_use]
    pub fn read_optimized() -> Self {
        Self {
            block_cache_size: 1024 * 1024 * 1024, // 1GB
            bloom_filter_bits: 14,
            ..Default::default()
        }
    }

    /// Config for ingestion and index builds.
    ///
    /// - Larger write buffers (128MB)
    /// - More write buffers (5)
    #[must_use]
    pub fn write_optimized() -> Self {
        Self {
            write_buffer_size: 128 * 1024 * 1024, // 128MB
            max_write_buffers: 5,
            ..Default::default()
        }
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidConfig` if:
    /// - `block_cache_size` < 1MB
    /// - `bloom_filter_bits` not in 1..=20
    /// - `write_buffer_size` < 1MB
    /// - `max_write_buffers` < 1
    /// - `target_file_size_base` < 1MB
    pub fn validate(&self) -> StorageResult<()> {
        const MIN_SIZE: usize = 1024 * 1024; // 1MB

        if self.block_cache_size < MIN_SIZE {
            return Err(StorageError::InvalidConfig(format!(
                "block_cache_size must be >= 1MB, got {} bytes",
                self.block_cache_size
            )));
        }

        if !(1..=20).contains(&self.bloom_filter_bits) {
            return Err(StorageError::InvalidConfig(format!(
                "bloom_filter_bits must be 1..=20, got {}",
                self.bloom_filter_bits
            )));
        }

        if self.write_buffer_size < MIN_SIZE {
            return Err(StorageError::InvalidConfig(format!(
                "write_buffer_size must be >= 1MB, got {} bytes",
                self.write_buffer_size
            )));
        }

        if self.max_write_buffers < 1 {
            return Err(StorageError::InvalidConfig(format!(
                "max_write_buffers must be >= 1, got {}",
                self.max_write_buffers
            )));
        }

        if self.target_file_size_base < MIN_SIZE as u64 {
            return Err(StorageError::InvalidConfig(format!(
                "target_file_size_base must be >= 1MB, got {} bytes",
                self.target_file_size_base
            )));
        }

        Ok(())
    }
}
