//! RocksDB column family definitions.
//!
//! # Column Families
//! | Name | Purpose | Key Format | Value |
//! |------|---------|------------|-------|
//! | label_node | label -> node rows | `label\0node` | language tag |
//! | part_node | part -> node rows | `part\0node` | empty |
//! | instance_class | instance -> class edges | `instance\0class` | empty |
//! | child_parent | child -> parent edges | `child\0parent` | empty |
//! | names | auxiliary names list | `name` | empty |
//! | concepts | concept relations | `form\0code\0concept\0pos` | empty |
//! | label_index | Label Index | `label` | versioned node set |
//! | part_index | Part Index | `part` | versioned node set |
//! | metadata | build markers | string key | u64 LE |
//!
//! All column families share one LRU block cache.

use rocksdb::{BlockBasedOptions, Cache, ColumnFamilyDescriptor, DBCompressionType, Options};

use crate::config::StorageConfig;
use crate::error::StorageResult;

/// Column family name constants.
pub mod cf_names {
    /// `label \0 node` rows.
    pub const LABEL_NODE: &str = "label_node";

    /// `part \0 node` rows.
    pub const PART_NODE: &str = "part_node";

    /// `instance \0 class` edges.
    pub const INSTANCE_CLASS: &str = "instance_class";

    /// `child \0 parent` edges.
    pub const CHILD_PARENT: &str = "child_parent";

    /// Names list.
    pub const NAMES: &str = "names";

    /// Concept relation rows.
    pub const CONCEPTS: &str = "concepts";

    /// Label Index: label -> node set.
    pub const LABEL_INDEX: &str = "label_index";

    /// Part Index: part -> node set.
    pub const PART_INDEX: &str = "part_index";

    /// Build completion markers.
    pub const METADATA: &str = "metadata";

    /// Relational row tables.
    pub const RELATIONAL: &[&str] = &[
        LABEL_NODE,
        PART_NODE,
        INSTANCE_CLASS,
        CHILD_PARENT,
        NAMES,
        CONCEPTS,
    ];

    /// All column family names in descriptor order.
    pub const ALL: &[&str] = &[
        LABEL_NODE,
        PART_NODE,
        INSTANCE_CLASS,
        CHILD_PARENT,
        NAMES,
        CONCEPTS,
        LABEL_INDEX,
        PART_INDEX,
        METADATA,
    ];
}

/// Get column family descriptors for every column family.
///
/// Order matches `cf_names::ALL`.
///
/// # Errors
///
/// Returns `StorageError::InvalidConfig` if configuration validation fails.
pub fn get_column_family_descriptors(
    config: &StorageConfig,
) -> StorageResult<Vec<ColumnFamilyDescriptor>> {
    config.validate()?;

    let cache = Cache::new_lru_cache(config.block_cache_size);

    let mut descriptors: Vec<ColumnFamilyDescriptor> = cf_names::RELATIONAL
        .iter()
        .map(|name| relational_cf_descriptor(name, config, &cache))
        .collect();
    descriptors.push(index_cf_descriptor(cf_names::LABEL_INDEX, config, &cache));
    descriptors.push(index_cf_descriptor(cf_names::PART_INDEX, config, &cache));
    descriptors.push(metadata_cf_descriptor(&cache));
    Ok(descriptors)
}

/// Row tables: ordered prefix scans over variable-length composite keys.
fn relational_cf_descriptor(
    name: &str,
    config: &StorageConfig,
    cache: &Cache,
) -> ColumnFamilyDescriptor {
    let mut opts = Options::default();

    opts.set_write_buffer_size(config.write_buffer_size);
    opts.set_max_write_buffer_number(config.max_write_buffers);
    opts.set_target_file_size_base(config.target_file_size_base);

    if config.enable_compression {
        opts.set_compression_type(DBCompressionType::Lz4);
    }

    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_block_size(16 * 1024); // 16KB blocks for range scans

    opts.set_block_based_table_factory(&block_opts);

    ColumnFamilyDescriptor::new(name, opts)
}

/// Index tables: point lookups, mostly misses during compound resolution.
fn index_cf_descriptor(name: &str, config: &StorageConfig, cache: &Cache) -> ColumnFamilyDescriptor {
    let mut opts = Options::default();

    opts.set_write_buffer_size(config.write_buffer_size);
    opts.set_max_write_buffer_number(config.max_write_buffers);
    opts.set_target_file_size_base(config.target_file_size_base);

    if config.enable_compression {
        opts.set_compression_type(DBCompressionType::Lz4);
    }

    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_block_size(8 * 1024);

    // Bloom filter for fast negative lookups
    block_opts.set_bloom_filter(config.bloom_filter_bits as f64, false);
    block_opts.set_whole_key_filtering(true);

    opts.set_block_based_table_factory(&block_opts);

    ColumnFamilyDescriptor::new(name, opts)
}

fn metadata_cf_descriptor(cache: &Cache) -> ColumnFamilyDescriptor {
    let mut opts = Options::default();

    opts.set_write_buffer_size(4 * 1024 * 1024); // 4MB
    opts.set_max_write_buffer_number(2);

    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_block_size(4 * 1024);

    opts.set_block_based_table_factory(&block_opts);

    ColumnFamilyDescriptor::new(cf_names::METADATA, opts)
}

/// Get default DB options for opening the database.
///
/// Creates the database and any missing column family, and scales
/// background parallelism with the CPU count.
#[must_use]
pub fn get_db_options() -> Options {
    let mut opts = Options::default();

    opts.create_if_missing(true);
    opts.create_missing_column_families(true);

    let cpu_count = num_cpus::get() as i32;
    opts.increase_parallelism(cpu_count.max(2));
    opts.set_max_background_jobs(cpu_count.clamp(2, 8));

    opts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_column_families() {
        assert_eq!(cf_names::ALL.len(), 9);
        for name in cf_names::RELATIONAL {
            assert!(cf_names::ALL.contains(name));
        }
        assert!(cf_names::ALL.contains(&cf_names::METADATA));
    }

    #[test]
    fn test_descriptor_count_matches_names() {
        let descriptors = get_column_family_descriptors(&StorageConfig::default()).unwrap();
        assert_eq!(descriptors.len(), cf_names::ALL.len());
        for (descriptor, name) in descriptors.iter().zip(cf_names::ALL) {
            assert_eq!(descriptor.name(), *name);
        }
    }

    #[test]
    fn test_descriptors_reject_invalid_config() {
        let config = StorageConfig {
            bloom_filter_bits: 0,
            ..Default::default()
        };
        assert!(get_column_family_descriptors(&config).is_err());
    }
}
