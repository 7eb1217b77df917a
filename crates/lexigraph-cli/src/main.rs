//! Lexigraph CLI
//!
//! Loads ontology dumps, builds the lemma indexes and resolves lemmas to
//! ontology nodes.
//!
//! # Commands
//!
//! - `ingest DIR`: load label, type, taxonomy, name and concept dumps
//! - `build-index`: build the Label Index and Part Index
//! - `resolve LEMMA...`: resolve a lemma or phrase
//! - `classes NODE...`: direct classes, ancestor closure or class expansion
//! - `annotate`: annotate relation triples
//! - `name`, `concepts`: auxiliary table lookups
//! - `stats`: table sizes and index build state
//!
//! Exit code 1 on error, 2 on corrupted stored data.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod error;
mod triples;

use crate::config::AppConfig;
use crate::error::{exit_code_for_error, CliExitCode};

/// Lexigraph - lemma to ontology node resolution
#[derive(Parser)]
#[command(name = "lexigraph")]
#[command(version)]
#[command(about = "Lemma to ontology node resolution over a lexical ontology")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (skips config/ and LEXIGRAPH__* layering)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database directory (overrides db_path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load ontology dumps into the relational tables
    Ingest(commands::ingest::IngestArgs),

    /// Build the Label Index and Part Index from the relational tables
    ///
    /// Run after every ingest. Queries refuse to run against a database
    /// whose indexes are missing or were interrupted mid-build.
    BuildIndex(commands::build::BuildArgs),

    /// Resolve lemmas to ontology nodes
    Resolve(commands::resolve::ResolveArgs),

    /// Taxonomy lookups for nodes
    Classes(commands::classes::ClassesArgs),

    /// Annotate relation triples with ontology nodes
    Annotate(commands::annotate::AnnotateArgs),

    /// Check whether a word is a known personal name
    Name(commands::lookup::NameArgs),

    /// Concepts related to a word form
    Concepts(commands::lookup::ConceptsArgs),

    /// Table sizes and index build state
    Stats,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    Ok(config)
}

fn init_logging(verbose: u8, default_level: &str) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command {
        Commands::Ingest(args) => commands::ingest::handle_ingest(args, config),
        Commands::BuildIndex(args) => commands::build::handle_build(args, config),
        Commands::Resolve(args) => commands::resolve::handle_resolve(args, config),
        Commands::Classes(args) => commands::classes::handle_classes(args, config),
        Commands::Annotate(args) => commands::annotate::handle_annotate(args, config),
        Commands::Name(args) => commands::lookup::handle_name(args, config),
        Commands::Concepts(args) => commands::lookup::handle_concepts(args, config),
        Commands::Stats => commands::stats::handle_stats(config),
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            init_logging(cli.verbose, "warn");
            error!("{:#}", err);
            std::process::exit(CliExitCode::Error.into());
        }
    };
    init_logging(cli.verbose, &config.logging.level);

    let exit_code = match run(cli, config) {
        Ok(()) => CliExitCode::Success,
        Err(err) => {
            error!("{:#}", err);
            exit_code_for_error(&err)
        }
    };
    std::process::exit(exit_code.into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve_with_globals() {
        let cli = Cli::try_parse_from([
            "lexigraph", "-vv", "--db", "/tmp/lex", "resolve", "vladimir", "putin", "--mode",
            "best", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/lex")));
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.lemmas, vec!["vladimir", "putin"]);
                assert_eq!(args.mode, commands::resolve::ResolveMode::Best);
                assert_eq!(args.format, commands::resolve::OutputFormat::Json);
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_db_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lexigraph.toml");
        std::fs::write(&path, "db_path = \"/from/file\"\n").unwrap();
        let cli = Cli::try_parse_from([
            "lexigraph",
            "--config",
            path.to_str().unwrap(),
            "--db",
            "/from/flag",
            "stats",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/from/flag"));
    }

    #[test]
    fn test_build_index_target() {
        let cli = Cli::try_parse_from(["lexigraph", "build-index", "--index", "part"]).unwrap();
        match cli.command {
            Commands::BuildIndex(args) => {
                assert_eq!(args.index, commands::build::IndexTarget::Part)
            }
            _ => panic!("expected build-index"),
        }
    }
}
