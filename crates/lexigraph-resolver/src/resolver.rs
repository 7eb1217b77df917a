//! Query facade over a built database.

use std::collections::BTreeSet;

use lexigraph_core::{ConceptRelation, Node, NodeSet};
use lexigraph_storage::{IndexKind, LexiconDb, NodeSetIndex, RelationalStore};
use tracing::{debug, info};

use crate::compound;
use crate::config::CompoundQuery;
use crate::error::{ResolverError, ResolverResult};
use crate::taxonomy;

/// Read access to the Label Index, Part Index and relational tables.
///
/// Clone is cheap (shared database handle); clones may serve queries from
/// several threads.
#[derive(Debug, Clone)]
pub struct Resolver {
    labels: NodeSetIndex,
    parts: NodeSetIndex,
    store: RelationalStore,
}

impl Resolver {
    /// Wrap a database whose indexes have both been built.
    ///
    /// # Errors
    /// * `ResolverError::IndexNotBuilt` - an index has no completion marker
    pub fn open(db: LexiconDb) -> ResolverResult<Self> {
        for kind in IndexKind::ALL {
            match db.marker(kind.marker_key())? {
                Some(records) => debug!(index = %kind, records, "index ready"),
                None => return Err(ResolverError::IndexNotBuilt { index: kind }),
            }
        }
        info!(path = db.path(), read_only = db.is_read_only(), "resolver ready");
        Ok(Self {
            labels: NodeSetIndex::new(db.clone(), IndexKind::Label),
            parts: NodeSetIndex::new(db.clone(), IndexKind::Part),
            store: RelationalStore::new(db),
        })
    }

    pub fn store(&self) -> &RelationalStore {
        &self.store
    }

    /// Nodes labelled exactly `lemma`.
    pub fn resolve_lemma(&self, lemma: &str) -> ResolverResult<Option<NodeSet>> {
        Ok(self.labels.get(lemma)?)
    }

    /// Nodes with a label containing the word `word`.
    pub fn resolve_part(&self, word: &str) -> ResolverResult<Option<NodeSet>> {
        Ok(self.parts.get(word)?)
    }

    /// Part Index intersection of every word of `compound`.
    pub fn idx_map_compound<S: AsRef<str>>(&self, compound: &[S]) -> ResolverResult<NodeSet> {
        Ok(compound::idx_map_compound(&self.parts, compound)?)
    }

    /// Intersection resolution, see [`compound::find_compound`].
    pub fn resolve_compound<S: AsRef<str>>(&self, lemmas: &[S]) -> ResolverResult<Option<NodeSet>> {
        compound::find_compound(&self.parts, &self.store, lemmas)
    }

    /// Best-combination resolution, see [`compound::find_compound_best`].
    pub fn resolve_compound_best<S: AsRef<str>>(
        &self,
        lemmas: &[S],
        query: &CompoundQuery,
    ) -> ResolverResult<Option<NodeSet>> {
        compound::find_compound_best(&self.parts, lemmas, query)
    }

    /// One lemma: exact label lookup. Several: intersection resolution.
    pub fn resolve_phrase<S: AsRef<str>>(&self, lemmas: &[S]) -> ResolverResult<Option<NodeSet>> {
        match lemmas {
            [] => Ok(None),
            [lemma] => self.resolve_lemma(lemma.as_ref()),
            _ => self.resolve_compound(lemmas),
        }
    }

    /// Direct classes of `node`, empty when it has none.
    pub fn classes_of(&self, node: &Node) -> ResolverResult<NodeSet> {
        Ok(self.find_class(node)?.unwrap_or_default())
    }

    /// Direct classes of `node`, `None` when it has none.
    pub fn find_class(&self, node: &Node) -> ResolverResult<Option<NodeSet>> {
        Ok(taxonomy::direct_classes(&self.store, node)?)
    }

    /// `node` and all its ancestors.
    pub fn ancestor_closure(&self, node: &Node) -> ResolverResult<NodeSet> {
        Ok(taxonomy::ancestor_closure(&self.store, node)?)
    }

    /// Same as [`ancestor_closure`](Self::ancestor_closure); always contains `node`.
    pub fn find_all_classes(&self, node: &Node) -> ResolverResult<NodeSet> {
        self.ancestor_closure(node)
    }

    /// Classes kept, instances replaced by their direct classes.
    pub fn expand_to_classes(&self, nodes: &NodeSet) -> ResolverResult<NodeSet> {
        Ok(taxonomy::expand_to_classes(&self.store, nodes)?)
    }

    pub fn is_name(&self, name: &str) -> ResolverResult<bool> {
        Ok(self.store.is_name(name)?)
    }

    pub fn find_concepts(
        &self,
        form: &str,
        relation: Option<ConceptRelation>,
    ) -> ResolverResult<Option<BTreeSet<String>>> {
        Ok(self.store.find_concepts(form, relation)?)
    }
}
