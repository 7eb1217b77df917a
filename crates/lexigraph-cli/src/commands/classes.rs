//! `classes`: taxonomy lookups for nodes.

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use lexigraph_core::{Node, NodeSet};
use lexigraph_resolver::Resolver;

use super::resolve::UNRESOLVED;
use super::format_node_set;
use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassesMode {
    /// Direct classes of one instance
    Direct,
    /// The node and every ancestor class
    Closure,
    /// Classes kept, instances replaced by their direct classes
    Expand,
}

#[derive(Args, Debug)]
pub struct ClassesArgs {
    /// Node identifiers, e.g. '<Vladimir_Putin>'
    #[arg(required = true)]
    pub nodes: Vec<String>,

    #[arg(long, value_enum, default_value_t = ClassesMode::Direct)]
    pub mode: ClassesMode,
}

pub fn lookup_classes(
    resolver: &Resolver,
    nodes: &[String],
    mode: ClassesMode,
) -> Result<Option<NodeSet>> {
    match (mode, nodes) {
        (ClassesMode::Direct, [node]) => Ok(resolver.find_class(&Node::new(node.as_str()))?),
        (ClassesMode::Closure, [node]) => {
            Ok(Some(resolver.ancestor_closure(&Node::new(node.as_str()))?))
        }
        (ClassesMode::Expand, _) => {
            let set: NodeSet = nodes.iter().map(|node| Node::new(node.as_str())).collect();
            Ok(Some(resolver.expand_to_classes(&set)?))
        }
        (_, _) => bail!("{:?} mode takes exactly one node, got {}", mode, nodes.len()),
    }
}

pub fn handle_classes(args: ClassesArgs, config: AppConfig) -> Result<()> {
    let resolver = super::open_resolver(&config)?;
    match lookup_classes(&resolver, &args.nodes, args.mode)? {
        Some(classes) => println!("{}", format_node_set(&classes)),
        None => println!("{}", UNRESOLVED),
    }
    Ok(())
}
