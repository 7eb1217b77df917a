//! Application configuration.
//!
//! Loaded in layers with the `config` crate:
//! 1. `config/default.toml` (optional)
//! 2. `config/{LEXIGRAPH_ENV}.toml` (optional, `LEXIGRAPH_ENV` defaults to `development`)
//! 3. `LEXIGRAPH__SECTION__KEY` environment variables
//!
//! An explicit `--config FILE` bypasses the layers and is parsed with `toml`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use lexigraph_resolver::{CompoundConfig, IndexerConfig};
use lexigraph_storage::StorageConfig;
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the ingest language in dump file names.
pub const LANG_PLACEHOLDER: &str = "{LANG}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub storage: StorageConfig,
    pub indexer: IndexerConfig,
    pub compound: CompoundConfig,
    pub ingest: IngestConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("lexigraph.db"),
            storage: StorageConfig::default(),
            indexer: IndexerConfig::default(),
            compound: CompoundConfig::default(),
            ingest: IngestConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Dump file names and the label language filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Keep only labels in this language (all languages when unset).
    pub lang: Option<String>,
    pub class_labels: String,
    pub instance_labels: String,
    pub instance_types: String,
    pub taxonomy: String,
    /// May contain `{LANG}`.
    pub names: String,
    /// May contain `{LANG}`.
    pub concepts: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            lang: None,
            class_labels: "yagoMultilingualClassLabels.tsv".to_string(),
            instance_labels: "yagoMultilingualInstanceLabels.tsv".to_string(),
            instance_types: "yagoTransitiveType.tsv".to_string(),
            taxonomy: "yagoTaxonomy.tsv".to_string(),
            names: "names_{LANG}.txt".to_string(),
            concepts: "conceptnet5_filtered_{LANG}.csv".to_string(),
        }
    }
}

impl IngestConfig {
    /// Substitute the language into a file name template.
    ///
    /// Returns `None` when the template needs a language and none is set.
    pub fn file_name(&self, template: &str) -> Option<String> {
        match (&self.lang, template.contains(LANG_PLACEHOLDER)) {
            (_, false) => Some(template.to_string()),
            (Some(lang), true) => Some(template.replace(LANG_PLACEHOLDER, lang)),
            (None, true) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when neither `-v` nor `RUST_LOG` is given.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the layered configuration.
    pub fn load() -> Result<Self> {
        let env = std::env::var("LEXIGRAPH_ENV").unwrap_or_else(|_| "development".to_string());

        let config: AppConfig = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                ::config::Environment::with_prefix("LEXIGRAPH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to assemble configuration")?
            .try_deserialize()
            .context("failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.db_path.as_os_str().is_empty() {
            bail!("db_path must not be empty");
        }
        self.storage.validate()?;
        self.indexer.validate()?;
        self.compound.to_query()?;
        if let Some(lang) = &self.ingest.lang {
            if lang.is_empty() {
                bail!("ingest.lang must not be empty when set");
            }
        }
        if self.logging.level.trim().is_empty() {
            bail!("logging.level must not be empty");
        }
        Ok(())
    }
}
