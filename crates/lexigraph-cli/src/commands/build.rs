//! `build-index`: fold the relational tables into the Label and Part indexes.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use lexigraph_resolver::{BuildReport, Indexer};
use lexigraph_storage::RelationalStore;
use tracing::info;

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IndexTarget {
    All,
    Label,
    Part,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Which index to (re)build
    #[arg(long, value_enum, default_value_t = IndexTarget::All)]
    pub index: IndexTarget,

    /// Records per committed write batch (overrides indexer.batch_size)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

pub fn run_build(indexer: &Indexer, target: IndexTarget) -> Result<Vec<BuildReport>> {
    let reports = match target {
        IndexTarget::All => indexer.build_all()?,
        IndexTarget::Label => vec![indexer.build_label_index()?],
        IndexTarget::Part => vec![indexer.build_part_index()?],
    };
    Ok(reports)
}

pub fn handle_build(args: BuildArgs, mut config: AppConfig) -> Result<()> {
    if let Some(batch_size) = args.batch_size {
        config.indexer.batch_size = batch_size;
    }
    let db = super::open_writable(&config)?;
    let indexer = Indexer::new(RelationalStore::new(db.clone()), config.indexer.clone())
        .context("invalid indexer configuration")?;

    let reports = run_build(&indexer, args.index)?;
    db.flush_all()?;
    for report in &reports {
        info!(%report, "build finished");
        println!("{}", report);
    }
    Ok(())
}
