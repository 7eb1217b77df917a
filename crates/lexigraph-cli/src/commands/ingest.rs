//! `ingest`: load ontology dumps into the relational tables.
//!
//! Malformed rows are skipped and counted. Storage failures abort the run;
//! rows committed before the failure stay, and a re-run is idempotent.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use lexigraph_core::{
    parse_concept_row, parse_label_row, parse_name_row, parse_transition_row, CoreError,
    TaxonomyEdge,
};
use lexigraph_storage::{RelationalStore, RowBatch, StorageError, StorageResult};
use tracing::{debug, info, warn};

use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Directory holding the dump files
    pub dir: PathBuf,

    /// Keep only labels in this language (overrides ingest.lang)
    #[arg(long)]
    pub lang: Option<String>,

    /// Rows per committed write batch (overrides indexer.batch_size)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

/// Dump file kinds, in ingestion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpKind {
    ClassLabels,
    InstanceLabels,
    InstanceTypes,
    Taxonomy,
    Names,
    Concepts,
}

impl DumpKind {
    pub const ALL: [DumpKind; 6] = [
        DumpKind::ClassLabels,
        DumpKind::InstanceLabels,
        DumpKind::InstanceTypes,
        DumpKind::Taxonomy,
        DumpKind::Names,
        DumpKind::Concepts,
    ];

    fn template(self, config: &AppConfig) -> &str {
        let ingest = &config.ingest;
        match self {
            DumpKind::ClassLabels => &ingest.class_labels,
            DumpKind::InstanceLabels => &ingest.instance_labels,
            DumpKind::InstanceTypes => &ingest.instance_types,
            DumpKind::Taxonomy => &ingest.taxonomy,
            DumpKind::Names => &ingest.names,
            DumpKind::Concepts => &ingest.concepts,
        }
    }
}

impl fmt::Display for DumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DumpKind::ClassLabels => "class labels",
            DumpKind::InstanceLabels => "instance labels",
            DumpKind::InstanceTypes => "instance types",
            DumpKind::Taxonomy => "taxonomy",
            DumpKind::Names => "names",
            DumpKind::Concepts => "concepts",
        };
        f.write_str(name)
    }
}

/// Per-file ingestion counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileReport {
    pub rows_read: u64,
    /// Rows staged for writing.
    pub parsed: u64,
    /// Label rows in another language.
    pub filtered: u64,
    /// Malformed rows, unknown relations and undecodable lines.
    pub skipped: u64,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows: {} parsed, {} filtered, {} skipped",
            self.rows_read, self.parsed, self.filtered, self.skipped
        )
    }
}

enum RowOutcome {
    Staged,
    Filtered,
    Skipped,
}

/// Parse one row of `kind` and stage it.
fn stage_row(
    kind: DumpKind,
    line: &str,
    lang: Option<&str>,
    batch: &mut RowBatch<'_>,
) -> StorageResult<RowOutcome> {
    let staged = match kind {
        DumpKind::ClassLabels | DumpKind::InstanceLabels => match parse_label_row(line) {
            Ok(entry) if lang.is_some_and(|lang| lang != entry.lang) => {
                return Ok(RowOutcome::Filtered)
            }
            Ok(entry) => batch.entry(&entry),
            Err(err) => return Ok(skip(kind, err)),
        },
        DumpKind::InstanceTypes | DumpKind::Taxonomy => match parse_transition_row(line) {
            Ok((from, to)) => {
                let edge = if kind == DumpKind::Taxonomy {
                    TaxonomyEdge::hierarchy(from, to)
                } else {
                    TaxonomyEdge::instance_of(from, to)
                };
                batch.edge(&edge)
            }
            Err(err) => return Ok(skip(kind, err)),
        },
        DumpKind::Names => match parse_name_row(line) {
            Ok(name) => batch.name(&name),
            Err(err) => return Ok(skip(kind, err)),
        },
        DumpKind::Concepts => match parse_concept_row(line) {
            Ok(row) => batch.concept(&row),
            Err(err) => return Ok(skip(kind, err)),
        },
    };
    match staged {
        Ok(()) => Ok(RowOutcome::Staged),
        Err(StorageError::InvalidKey { component, reason }) => {
            debug!(dump = %kind, component = %component, reason = %reason, "row not storable, skipped");
            Ok(RowOutcome::Skipped)
        }
        Err(err) => Err(err),
    }
}

fn skip(kind: DumpKind, err: CoreError) -> RowOutcome {
    match &err {
        CoreError::UnknownRelation(_) => warn!(dump = %kind, error = %err, "row dropped"),
        _ => debug!(dump = %kind, error = %err, "malformed row skipped"),
    }
    RowOutcome::Skipped
}

/// Stage every line of `reader` as rows of `kind`.
pub fn ingest_reader<R: BufRead>(
    kind: DumpKind,
    reader: R,
    lang: Option<&str>,
    batch: &mut RowBatch<'_>,
) -> Result<FileReport> {
    let mut report = FileReport::default();
    for line in reader.split(b'\n') {
        let line = line.with_context(|| format!("failed to read {} dump", kind))?;
        report.rows_read += 1;
        let Ok(line) = String::from_utf8(line) else {
            debug!(dump = %kind, row = report.rows_read, "line is not UTF-8, skipped");
            report.skipped += 1;
            continue;
        };
        match stage_row(kind, &line, lang, batch)? {
            RowOutcome::Staged => report.parsed += 1,
            RowOutcome::Filtered => report.filtered += 1,
            RowOutcome::Skipped => report.skipped += 1,
        }
    }
    Ok(report)
}

fn ingest_file(
    kind: DumpKind,
    path: &Path,
    lang: Option<&str>,
    batch: &mut RowBatch<'_>,
) -> Result<FileReport> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let report = ingest_reader(kind, BufReader::new(file), lang, batch)?;
    info!(dump = %kind, path = %path.display(), %report, "dump ingested");
    Ok(report)
}

/// Ingest every configured dump found in `dir`.
///
/// Missing files are skipped with a warning, as are `{LANG}` templates when
/// no language is set.
pub fn run_ingest(
    store: &RelationalStore,
    dir: &Path,
    config: &AppConfig,
) -> Result<Vec<(DumpKind, FileReport)>> {
    let lang = config.ingest.lang.as_deref();
    let mut batch = store.row_batch(config.indexer.batch_size)?;
    let mut reports = Vec::new();

    for kind in DumpKind::ALL {
        let Some(file_name) = config.ingest.file_name(kind.template(config)) else {
            warn!(dump = %kind, "file name needs a language, none set; skipped");
            continue;
        };
        let path = dir.join(file_name);
        if !path.is_file() {
            warn!(dump = %kind, path = %path.display(), "dump file not found; skipped");
            continue;
        }
        reports.push((kind, ingest_file(kind, &path, lang, &mut batch)?));
    }

    let stats = batch.finish()?;
    info!(
        records = stats.records_written,
        batches = stats.batches_flushed,
        "ingest committed"
    );
    Ok(reports)
}

pub fn handle_ingest(args: IngestArgs, mut config: AppConfig) -> Result<()> {
    if args.lang.is_some() {
        config.ingest.lang = args.lang;
    }
    if let Some(batch_size) = args.batch_size {
        config.indexer.batch_size = batch_size;
    }
    config.validate()?;

    let store = RelationalStore::new(super::open_writable(&config)?);
    let reports = run_ingest(&store, &args.dir, &config)?;
    if reports.is_empty() {
        warn!(dir = %args.dir.display(), "no dump files ingested");
    }
    for (kind, report) in &reports {
        println!("{}: {}", kind, report);
    }
    println!("{}", store.table_counts()?);
    Ok(())
}
