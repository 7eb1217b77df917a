//! `resolve`: map lemmas to ontology nodes.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use lexigraph_core::NodeSet;
use lexigraph_resolver::{CompoundQuery, Resolver};
use serde::Serialize;
use tracing::debug;

use super::format_node_set;
use crate::config::AppConfig;

/// Printed in text mode when nothing resolves.
pub const UNRESOLVED: &str = "(unresolved)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolveMode {
    /// One lemma: exact label; several: intersection
    Phrase,
    /// Exact label of the lemmas joined by spaces
    Label,
    /// Part Index entry of a single word
    Part,
    /// Classes shared by every lemma
    Compound,
    /// Best-scoring order-preserving combination
    Best,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Lemmas to resolve, in phrase order
    #[arg(required = true)]
    pub lemmas: Vec<String>,

    #[arg(long, value_enum, default_value_t = ResolveMode::Phrase)]
    pub mode: ResolveMode,

    /// Smallest acceptable result set (best mode)
    #[arg(long)]
    pub min_threshold: Option<usize>,

    /// Shortest combination tried (best mode)
    #[arg(long)]
    pub init_len: Option<usize>,

    /// Longest combination tried (best mode)
    #[arg(long)]
    pub max_len: Option<usize>,

    /// Keep instances in the winning set (best mode)
    #[arg(long)]
    pub all_nodes: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ResolveArgs {
    fn query(&self, config: &AppConfig) -> Result<CompoundQuery> {
        let base = &config.compound;
        let query = CompoundQuery::new(
            self.min_threshold.unwrap_or(base.min_threshold),
            self.init_len.unwrap_or(base.init_len),
            self.max_len.unwrap_or(base.max_len),
            base.prefer_classes && !self.all_nodes,
        )?;
        Ok(query)
    }
}

#[derive(Debug, Serialize)]
struct JsonResolution<'a> {
    lemmas: &'a [String],
    nodes: Option<&'a NodeSet>,
}

pub fn resolve(
    resolver: &Resolver,
    lemmas: &[String],
    mode: ResolveMode,
    query: &CompoundQuery,
) -> Result<Option<NodeSet>> {
    let resolved = match mode {
        ResolveMode::Phrase => resolver.resolve_phrase(lemmas)?,
        ResolveMode::Label => resolver.resolve_lemma(&lemmas.join(" "))?,
        ResolveMode::Part => match lemmas {
            [word] => resolver.resolve_part(word)?,
            _ => anyhow::bail!("part mode takes exactly one word, got {}", lemmas.len()),
        },
        ResolveMode::Compound => resolver.resolve_compound(lemmas)?,
        ResolveMode::Best => resolver.resolve_compound_best(lemmas, query)?,
    };
    debug!(
        ?mode,
        lemmas = lemmas.len(),
        found = ?resolved.as_ref().map(|nodes| nodes.len()),
        "resolved"
    );
    Ok(resolved)
}

pub fn render(lemmas: &[String], resolved: Option<&NodeSet>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(resolved
            .map(format_node_set)
            .unwrap_or_else(|| UNRESOLVED.to_string())),
        OutputFormat::Json => serde_json::to_string(&JsonResolution {
            lemmas,
            nodes: resolved,
        })
        .context("failed to serialize resolution"),
    }
}

pub fn handle_resolve(args: ResolveArgs, config: AppConfig) -> Result<()> {
    let query = args.query(&config)?;
    let lemmas: Vec<String> = args.lemmas.iter().map(|lemma| lemma.to_lowercase()).collect();
    let resolver = super::open_resolver(&config)?;
    let resolved = resolve(&resolver, &lemmas, args.mode, &query)?;
    println!("{}", render(&lemmas, resolved.as_ref(), args.format)?);
    Ok(())
}
