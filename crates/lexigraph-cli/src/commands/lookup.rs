//! `name` and `concepts`: auxiliary table lookups.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use clap::Args;
use lexigraph_core::ConceptRelation;
use lexigraph_resolver::Resolver;

use super::resolve::UNRESOLVED;
use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct NameArgs {
    pub name: String,
}

#[derive(Args, Debug)]
pub struct ConceptsArgs {
    /// Word form, matched lowercased
    pub form: String,

    /// Restrict to one relation (ConceptuallyRelatedTo, DerivedFrom, Synonym)
    #[arg(long)]
    pub relation: Option<String>,
}

pub fn find_concepts(
    resolver: &Resolver,
    form: &str,
    relation: Option<&str>,
) -> Result<Option<BTreeSet<String>>> {
    let relation = relation
        .map(|token| token.parse::<ConceptRelation>())
        .transpose()
        .context("invalid --relation")?;
    Ok(resolver.find_concepts(&form.to_lowercase(), relation)?)
}

pub fn handle_name(args: NameArgs, config: AppConfig) -> Result<()> {
    let resolver = super::open_resolver(&config)?;
    let known = resolver.is_name(&args.name)?;
    println!("{}", if known { "yes" } else { "no" });
    Ok(())
}

pub fn handle_concepts(args: ConceptsArgs, config: AppConfig) -> Result<()> {
    let resolver = super::open_resolver(&config)?;
    match find_concepts(&resolver, &args.form, args.relation.as_deref())? {
        Some(concepts) => {
            for concept in concepts {
                println!("{}", concept);
            }
        }
        None => println!("{}", UNRESOLVED),
    }
    Ok(())
}
