//! Taxonomy store
//!
//! Construction and querying are separate phases:
//!
//! - [`TaxonomyBuilder`] is the mutable phase. Concepts, labels and
//!   broader/narrower edges can be added freely.
//! - [`Taxonomy`] is the frozen phase produced by [`TaxonomyBuilder::build`].
//!   The hierarchy can no longer change, so ancestor closures are computed
//!   lazily and memoized for the lifetime of the instance. Only frequency
//!   annotations remain mutable.
//!
//! Going back to the mutable phase is explicit: [`Taxonomy::into_builder`]
//! discards the ancestor memo.

use crate::ancestors::AncestorMemo;
use crate::concept::{ConceptId, ConceptLabels, Label, LabelKind, NodeTable};
use crate::config::TaxonomyConfig;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use thesaurus_vocab::internal;

/// Mutable construction phase of a taxonomy.
#[derive(Clone, Debug)]
pub struct TaxonomyBuilder {
    pub(crate) config: TaxonomyConfig,
    pub(crate) table: NodeTable,
    pub(crate) root: ConceptId,
}

impl TaxonomyBuilder {
    /// Create a builder holding only the reserved root concept `:T`, the top
    /// concept of the internal scheme `:scheme`.
    pub fn new(config: TaxonomyConfig) -> Self {
        let mut table = NodeTable::default();
        let root = table.intern(internal::TOP);
        let scheme = table.intern(internal::SCHEME);
        let lang: Arc<str> = Arc::from(config.language.as_str());
        let node = table.node_mut(root);
        node.is_concept = true;
        node.labels.push(Label {
            kind: LabelKind::Preferred,
            text: Arc::from(internal::TOP),
            lang: Some(lang),
        });
        node.top_concept_of.push(scheme);
        Self {
            config,
            table,
            root,
        }
    }

    /// Root concept id
    pub fn root(&self) -> ConceptId {
        self.root
    }

    pub fn config(&self) -> &TaxonomyConfig {
        &self.config
    }

    /// Number of tracked nodes (concepts and referenced identifiers)
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Look up a node without creating it
    pub fn id(&self, iri: &str) -> Option<ConceptId> {
        self.table.get(iri)
    }

    /// Track `iri` without marking it as a concept
    pub fn intern(&mut self, iri: &str) -> ConceptId {
        self.table.intern(iri)
    }

    /// Track `iri` and mark it as a concept
    pub fn add_concept(&mut self, iri: &str) -> ConceptId {
        let id = self.table.intern(iri);
        self.table.node_mut(id).is_concept = true;
        id
    }

    /// Attach a label; identical labels are stored once.
    pub fn add_label(&mut self, iri: &str, kind: LabelKind, text: &str, lang: Option<&str>) {
        let id = self.table.intern(iri);
        let label = Label {
            kind,
            text: Arc::from(text),
            lang: lang.map(Arc::from),
        };
        let node = self.table.node_mut(id);
        if !node.labels.contains(&label) {
            node.labels.push(label);
        }
    }

    /// Record `narrower skos:broader broader` and its inverse.
    pub fn add_broader(&mut self, narrower: &str, broader: &str) {
        let child = self.table.intern(narrower);
        let parent = self.table.intern(broader);
        self.table.link(child, parent);
    }

    /// Record a symmetric `skos:related` edge.
    pub fn add_related(&mut self, a: &str, b: &str) {
        let a = self.table.intern(a);
        let b = self.table.intern(b);
        if !self.table.node(a).related.contains(&b) {
            self.table.node_mut(a).related.push(b);
        }
        if !self.table.node(b).related.contains(&a) {
            self.table.node_mut(b).related.push(a);
        }
    }

    /// Record `concept skos:topConceptOf scheme`.
    pub fn add_top_concept(&mut self, concept: &str, scheme: &str) {
        let concept = self.table.intern(concept);
        let scheme = self.table.intern(scheme);
        let node = self.table.node_mut(concept);
        if !node.top_concept_of.contains(&scheme) {
            node.top_concept_of.push(scheme);
        }
    }

    /// Link every declared top concept of any scheme directly under the root.
    ///
    /// Returns the number of top concepts anchored.
    pub fn anchor_top_concepts(&mut self) -> usize {
        let root = self.root;
        let tops: Vec<ConceptId> = self
            .table
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.top_concept_of.is_empty())
            .map(|(i, _)| ConceptId(i as u32))
            .filter(|&id| id != root)
            .collect();
        for &top in &tops {
            self.table.link(top, root);
        }
        tops.len()
    }

    /// Insert a chain of concepts, each one narrower than the previous.
    ///
    /// The first element is linked directly under the root. Every element gets
    /// its preferred label (untagged) and is marked as a concept.
    pub fn add_path<I, S, L>(&mut self, path: I)
    where
        I: IntoIterator<Item = (S, L)>,
        S: AsRef<str>,
        L: AsRef<str>,
    {
        let mut prev = self.root;
        for (iri, pref_label) in path {
            let iri = iri.as_ref();
            let id = self.add_concept(iri);
            self.add_label(iri, LabelKind::Preferred, pref_label.as_ref(), None);
            self.table.link(id, prev);
            prev = id;
        }
    }

    /// Set the own-frequency annotation of a node
    pub fn set_own_frequency(&mut self, iri: &str, value: f64) {
        let id = self.table.intern(iri);
        self.table.node_mut(id).own_frequency = Some(value);
    }

    /// Set the cumulative-frequency annotation of a node
    pub fn set_cumulative_frequency(&mut self, iri: &str, value: f64) {
        let id = self.table.intern(iri);
        self.table.node_mut(id).cum_frequency = Some(value);
    }

    /// Freeze the hierarchy.
    pub fn build(self) -> Taxonomy {
        let ancestors = AncestorMemo::new(self.table.len());
        Taxonomy {
            config: self.config,
            table: self.table,
            root: self.root,
            ancestors,
        }
    }
}

/// Frozen taxonomy: fixed hierarchy, mutable frequency annotations.
#[derive(Debug)]
pub struct Taxonomy {
    pub(crate) config: TaxonomyConfig,
    pub(crate) table: NodeTable,
    pub(crate) root: ConceptId,
    pub(crate) ancestors: AncestorMemo,
}

impl Taxonomy {
    /// Return to the construction phase. The ancestor memo is dropped.
    pub fn into_builder(self) -> TaxonomyBuilder {
        TaxonomyBuilder {
            config: self.config,
            table: self.table,
            root: self.root,
        }
    }

    pub fn config(&self) -> &TaxonomyConfig {
        &self.config
    }

    /// Root concept id
    #[inline]
    pub fn root(&self) -> ConceptId {
        self.root
    }

    /// Number of tracked nodes
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Resolve an IRI to its id
    pub fn id(&self, iri: &str) -> Option<ConceptId> {
        self.table.get(iri)
    }

    /// IRI of a node
    pub fn iri(&self, id: ConceptId) -> &str {
        &self.table.node(id).iri
    }

    /// True if the node was declared a concept
    pub fn is_concept(&self, id: ConceptId) -> bool {
        self.table.node(id).is_concept
    }

    /// All tracked node ids in id order
    pub fn node_ids(&self) -> impl Iterator<Item = ConceptId> + '_ {
        (0..self.table.len() as u32).map(ConceptId)
    }

    /// Every node marked as a concept, reachable from the root or not.
    pub fn all_concepts(&self) -> BTreeSet<ConceptId> {
        self.node_ids().filter(|&id| self.is_concept(id)).collect()
    }

    /// Concepts that are not the broader concept of anything.
    pub fn leaves(&self) -> BTreeSet<ConceptId> {
        self.node_ids()
            .filter(|&id| {
                let node = self.table.node(id);
                node.is_concept && node.narrower.is_empty()
            })
            .collect()
    }

    /// Direct broader concepts
    pub fn broader(&self, id: ConceptId) -> &[ConceptId] {
        &self.table.node(id).broader
    }

    /// Direct narrower concepts
    pub fn narrower(&self, id: ConceptId) -> &[ConceptId] {
        &self.table.node(id).narrower
    }

    /// Direct narrower concepts of the root
    pub fn top_concepts(&self) -> &[ConceptId] {
        self.narrower(self.root)
    }

    /// `id` plus everything reachable over narrower edges, in BFS order.
    pub fn descendants_or_self(&self, id: ConceptId) -> Vec<ConceptId> {
        let mut visited: FxHashSet<ConceptId> = FxHashSet::default();
        let mut queue: VecDeque<ConceptId> = VecDeque::new();
        let mut result = Vec::new();

        visited.insert(id);
        queue.push_back(id);
        while let Some(current) = queue.pop_front() {
            result.push(current);
            for &child in self.narrower(current) {
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        result
    }

    /// Labels of a concept visible in `lang` (tagged with it or untagged),
    /// excluding internal sentinel labels.
    pub fn labels(&self, id: ConceptId, lang: &str) -> ConceptLabels {
        let mut out = ConceptLabels::default();
        for label in &self.table.node(id).labels {
            if label.matches_lang(lang) && !internal::is_sentinel(&label.text) {
                out.push(label.kind, &label.text);
            }
        }
        out
    }

    /// Every non-sentinel label tagged with exactly `lang`, grouped by IRI.
    pub fn labels_by_concept(&self, lang: &str) -> FxHashMap<String, Vec<String>> {
        let mut out: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for node in &self.table.nodes {
            for label in &node.labels {
                if label.lang.as_deref() == Some(lang) && !internal::is_sentinel(&label.text) {
                    out.entry(node.iri.to_string())
                        .or_default()
                        .push(label.text.to_string());
                }
            }
        }
        out
    }

    /// One preferred label per IRI, tagged with exactly `lang`.
    ///
    /// When a concept has several, the last one wins.
    pub fn pref_labels(&self, lang: &str) -> FxHashMap<String, String> {
        let mut out = FxHashMap::default();
        for node in &self.table.nodes {
            for label in &node.labels {
                if label.kind == LabelKind::Preferred
                    && label.lang.as_deref() == Some(lang)
                    && !internal::is_sentinel(&label.text)
                {
                    out.insert(node.iri.to_string(), label.text.to_string());
                }
            }
        }
        out
    }

    /// First preferred label of any language, sentinel labels included.
    pub fn pref_label(&self, id: ConceptId) -> Option<&str> {
        self.table
            .node(id)
            .labels
            .iter()
            .find(|l| l.kind == LabelKind::Preferred)
            .map(|l| l.text.as_ref())
    }

    /// Hierarchy edges as `(narrower, broader)` pairs; with `use_related`,
    /// both directions of every `skos:related` edge are appended.
    pub fn graph_edges(&self, use_related: bool) -> Vec<(ConceptId, ConceptId)> {
        let mut edges = Vec::new();
        for id in self.node_ids() {
            for &parent in self.broader(id) {
                edges.push((id, parent));
            }
        }
        if use_related {
            for id in self.node_ids() {
                for &other in &self.table.node(id).related {
                    edges.push((id, other));
                }
            }
        }
        edges
    }

    /// Schemes a node is a top concept of
    pub fn top_concept_of(&self, id: ConceptId) -> &[ConceptId] {
        &self.table.node(id).top_concept_of
    }

    /// Direct related concepts
    pub fn related(&self, id: ConceptId) -> &[ConceptId] {
        &self.table.node(id).related
    }

    pub(crate) fn raw_labels(&self, id: ConceptId) -> &[Label] {
        &self.table.node(id).labels
    }
}
