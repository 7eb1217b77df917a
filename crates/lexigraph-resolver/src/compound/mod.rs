//! Multi-lemma resolution against the Part Index.
//!
//! Two strategies:
//!
//! - [`find_compound`]: look up every lemma, expand instances to their
//!   classes, and intersect. Finds what all words of the phrase have in
//!   common at the class level.
//! - [`find_compound_best`]: try every order-preserving sub-combination of
//!   the lemmas and keep the smallest node set that still meets a size
//!   threshold, optionally reduced to classes or to one instance.
//!
//! Missing parts are never errors; they narrow results to the empty set.

mod combinations;

pub use combinations::Combinations;

use lexigraph_core::NodeSet;
use lexigraph_storage::{NodeSetLookup, StorageResult, TaxonomyEdges};
use tracing::debug;

use crate::config::CompoundQuery;
use crate::error::ResolverResult;
use crate::taxonomy::expand_to_classes;

/// Intersection of the Part Index sets of every part of `compound`.
///
/// Empty as soon as one part is missing or the running intersection runs
/// dry. An empty `compound` yields the empty set.
pub fn idx_map_compound<P, S>(parts: &P, compound: &[S]) -> StorageResult<NodeSet>
where
    P: NodeSetLookup + ?Sized,
    S: AsRef<str>,
{
    let mut intersection: Option<NodeSet> = None;
    for part in compound {
        let Some(nodes) = parts.lookup(part.as_ref())? else {
            return Ok(NodeSet::new());
        };
        let narrowed = match intersection {
            None => nodes,
            Some(current) => current.intersection(&nodes).cloned().collect(),
        };
        if narrowed.is_empty() {
            return Ok(narrowed);
        }
        intersection = Some(narrowed);
    }
    Ok(intersection.unwrap_or_default())
}

/// Intersection resolution.
///
/// - `None` when `lemmas` is empty or no lemma has a Part Index entry
/// - `Some(empty)` when the lemmas matched individually but share no class
/// - otherwise the classes common to every matched lemma
///
/// Lemmas without a Part Index entry are ignored, so the result does not
/// depend on lemma order.
pub fn find_compound<P, T, S>(parts: &P, edges: &T, lemmas: &[S]) -> ResolverResult<Option<NodeSet>>
where
    P: NodeSetLookup + ?Sized,
    T: TaxonomyEdges + ?Sized,
    S: AsRef<str>,
{
    if lemmas.is_empty() {
        return Ok(None);
    }

    let mut matched = Vec::with_capacity(lemmas.len());
    for lemma in lemmas {
        let nodes = idx_map_compound(parts, std::slice::from_ref(lemma))?;
        if !nodes.is_empty() {
            matched.push(nodes);
        }
    }
    if matched.is_empty() {
        debug!(lemmas = lemmas.len(), "compound: no lemma matched");
        return Ok(None);
    }

    let mut result: Option<NodeSet> = None;
    for nodes in &matched {
        let classes = expand_to_classes(edges, nodes)?;
        result = Some(match result {
            None => classes,
            Some(current) => current.intersection(&classes).cloned().collect(),
        });
    }
    let result = result.unwrap_or_default();

    debug!(
        lemmas = lemmas.len(),
        matched = matched.len(),
        hits = result.len(),
        "compound resolved"
    );
    Ok(Some(result))
}

/// Best-combination resolution.
///
/// Enumerates combinations of length `init_len..=min(max_len, lemmas.len())`
/// in lexicographic index order and keeps the smallest intersection of size
/// at least `min_threshold`. On equal sizes the first one found wins.
///
/// With `prefer_classes`, a winning set containing classes is reduced to its
/// classes; an all-instance set is reduced to the instance with the fewest
/// underscore-delimited name segments (first in set order on ties).
///
/// Returns `None` for empty input or when no combination qualifies.
pub fn find_compound_best<P, S>(
    parts: &P,
    lemmas: &[S],
    query: &CompoundQuery,
) -> ResolverResult<Option<NodeSet>>
where
    P: NodeSetLookup + ?Sized,
    S: AsRef<str>,
{
    if lemmas.is_empty() {
        return Ok(None);
    }

    let upper = query.max_len().min(lemmas.len());
    let mut best: Option<NodeSet> = None;
    let mut tried = 0usize;

    for len in query.init_len()..=upper {
        for indices in Combinations::new(lemmas.len(), len) {
            let combination: Vec<&str> = indices.iter().map(|&i| lemmas[i].as_ref()).collect();
            let nodes = idx_map_compound(parts, combination.as_slice())?;
            tried += 1;

            if nodes.len() < query.min_threshold() {
                continue;
            }
            if best.as_ref().map_or(true, |current| nodes.len() < current.len()) {
                best = Some(nodes);
            }
        }
    }

    debug!(
        lemmas = lemmas.len(),
        combinations = tried,
        best = best.as_ref().map(|s| s.len()),
        "best compound search"
    );

    let Some(best) = best else {
        return Ok(None);
    };
    if !query.prefer_classes() {
        return Ok(Some(best));
    }
    Ok(Some(prefer_classes(best)))
}

fn prefer_classes(nodes: NodeSet) -> NodeSet {
    let classes: NodeSet = nodes.iter().filter(|n| n.is_class()).cloned().collect();
    if !classes.is_empty() {
        return classes;
    }
    // min_by_key keeps the first of equal minima
    nodes
        .into_iter()
        .min_by_key(|n| n.name_segments())
        .into_iter()
        .collect()
}
