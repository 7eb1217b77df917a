//! `annotate`: attach ontology nodes to the noun arguments of relation triples.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use lexigraph_core::NodeSet;
use lexigraph_resolver::Resolver;
use tracing::{debug, info};

use super::format_node_set;
use crate::config::AppConfig;
use crate::triples::{Argument, Triple, LEMMA_SEPARATOR};

/// Field separator of annotated rows.
const OUTPUT_SEPARATOR: &str = ",";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnnotateMode {
    /// Rewrite every row with resolved noun arguments
    Rows,
    /// List multi-lemma noun arguments that resolve
    Compounds,
}

#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Triples file (stdin when omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = AnnotateMode::Rows)]
    pub mode: AnnotateMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateReport {
    pub rows: u64,
    pub skipped: u64,
    /// Noun arguments that resolved to at least one node.
    pub resolved: u64,
}

impl fmt::Display for AnnotateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows, {} skipped, {} arguments resolved",
            self.rows, self.skipped, self.resolved
        )
    }
}

/// Annotate every row of `input`, writing to `output`.
pub fn annotate<R: BufRead, W: Write>(
    resolver: &Resolver,
    input: R,
    output: &mut W,
    mode: AnnotateMode,
) -> Result<AnnotateReport> {
    let mut report = AnnotateReport::default();
    for line in input.lines() {
        let line = line.context("failed to read triples")?;
        report.rows += 1;
        let triple = match Triple::parse(&line) {
            Ok(triple) => triple,
            Err(err) => {
                debug!(row = report.rows, error = %err, "triple skipped");
                report.skipped += 1;
                continue;
            }
        };
        report.resolved += match mode {
            AnnotateMode::Rows => write_row(resolver, &triple, output)?,
            AnnotateMode::Compounds => write_compounds(resolver, &triple, output)?,
        };
    }
    output.flush().context("failed to flush output")?;
    Ok(report)
}

fn write_row<W: Write>(resolver: &Resolver, triple: &Triple, output: &mut W) -> Result<u64> {
    let mut resolved = 0;
    let mut fields = Vec::with_capacity(triple.args.len() + 2);
    fields.push(triple.relation.clone());
    for arg in &triple.args {
        match (arg, arg.noun_lemmas()) {
            (Argument::Word { lemmas, pos }, Some(words)) => {
                let nodes = resolver.resolve_phrase(words.as_slice())?.unwrap_or_default();
                if !nodes.is_empty() {
                    resolved += 1;
                }
                fields.push(format!("{}/{}-{}", format_node_set(&nodes), lemmas, pos));
            }
            _ => fields.push(arg.to_string()),
        }
    }
    fields.push(triple.freq.clone());
    writeln!(output, "{}", fields.join(OUTPUT_SEPARATOR))?;
    Ok(resolved)
}

fn write_compounds<W: Write>(resolver: &Resolver, triple: &Triple, output: &mut W) -> Result<u64> {
    let mut resolved = 0;
    for arg in &triple.args {
        let Some(words) = arg.noun_lemmas() else {
            continue;
        };
        if words.len() < 2 {
            continue;
        }
        let Some(nodes) = resolver.resolve_compound(words.as_slice())? else {
            continue;
        };
        if nodes.is_empty() {
            continue;
        }
        resolved += 1;
        write_compound(resolver, &words.join(LEMMA_SEPARATOR), &nodes, output)?;
    }
    Ok(resolved)
}

/// `lemmas\t{nodes}`; a lone instance is followed by its direct classes.
fn write_compound<W: Write>(
    resolver: &Resolver,
    lemmas: &str,
    nodes: &NodeSet,
    output: &mut W,
) -> Result<()> {
    write!(output, "{}\t{}", lemmas, format_node_set(nodes))?;
    match nodes.first() {
        Some(node) if nodes.len() == 1 && !node.is_class() => {
            writeln!(output, " =>")?;
            for class in resolver.classes_of(node)? {
                writeln!(output, "\t\t{}", class)?;
            }
        }
        _ => writeln!(output)?,
    }
    writeln!(output)?;
    Ok(())
}

pub fn handle_annotate(args: AnnotateArgs, config: AppConfig) -> Result<()> {
    let resolver = super::open_resolver(&config)?;

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let report = annotate(&resolver, input, &mut output, args.mode)?;
    info!(mode = ?args.mode, %report, "annotation finished");
    Ok(())
}
