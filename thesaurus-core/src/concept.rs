//! Concept identifiers, labels and the node table shared by the builder and
//! the frozen taxonomy.

use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Dense identifier of a node in one taxonomy instance.
///
/// Only meaningful for the taxonomy that issued it; persisted artifacts use
/// IRIs instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConceptId(pub(crate) u32);

impl ConceptId {
    /// Position in the node table
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// SKOS label kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelKind {
    /// skos:prefLabel
    Preferred,
    /// skos:altLabel
    Alternative,
    /// skos:hiddenLabel
    Hidden,
}

impl LabelKind {
    pub const ALL: [LabelKind; 3] = [
        LabelKind::Preferred,
        LabelKind::Alternative,
        LabelKind::Hidden,
    ];
}

/// A label literal with an optional language tag
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub kind: LabelKind,
    pub text: Arc<str>,
    pub lang: Option<Arc<str>>,
}

impl Label {
    /// True if the label is visible for `lang`: tagged with exactly that
    /// language or untagged.
    pub fn matches_lang(&self, lang: &str) -> bool {
        self.lang.as_deref().map_or(true, |l| l == lang)
    }
}

/// Labels of one concept grouped by kind, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptLabels {
    pub preferred: Vec<String>,
    pub alternative: Vec<String>,
    pub hidden: Vec<String>,
}

impl ConceptLabels {
    pub fn by_kind(&self, kind: LabelKind) -> &[String] {
        match kind {
            LabelKind::Preferred => &self.preferred,
            LabelKind::Alternative => &self.alternative,
            LabelKind::Hidden => &self.hidden,
        }
    }

    pub(crate) fn push(&mut self, kind: LabelKind, text: &str) {
        let target = match kind {
            LabelKind::Preferred => &mut self.preferred,
            LabelKind::Alternative => &mut self.alternative,
            LabelKind::Hidden => &mut self.hidden,
        };
        target.push(text.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.preferred.is_empty() && self.alternative.is_empty() && self.hidden.is_empty()
    }
}

/// One node of the hierarchy.
///
/// Nodes referenced only as edge targets are tracked with
/// `is_concept == false`.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub iri: Arc<str>,
    pub is_concept: bool,
    pub labels: Vec<Label>,
    pub broader: SmallVec<[ConceptId; 2]>,
    pub narrower: SmallVec<[ConceptId; 4]>,
    pub related: SmallVec<[ConceptId; 2]>,
    /// Schemes this node is a top concept of
    pub top_concept_of: SmallVec<[ConceptId; 1]>,
    pub own_frequency: Option<f64>,
    pub cum_frequency: Option<f64>,
}

impl Node {
    fn new(iri: Arc<str>) -> Self {
        Self {
            iri,
            is_concept: false,
            labels: Vec::new(),
            broader: SmallVec::new(),
            narrower: SmallVec::new(),
            related: SmallVec::new(),
            top_concept_of: SmallVec::new(),
            own_frequency: None,
            cum_frequency: None,
        }
    }
}

/// Interned node storage: IRI -> dense id -> node.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeTable {
    pub nodes: Vec<Node>,
    pub index: FxHashMap<Arc<str>, ConceptId>,
}

impl NodeTable {
    /// Look up or create the node for `iri`.
    pub fn intern(&mut self, iri: &str) -> ConceptId {
        if let Some(&id) = self.index.get(iri) {
            return id;
        }
        let id = ConceptId(self.nodes.len() as u32);
        let iri: Arc<str> = Arc::from(iri);
        self.nodes.push(Node::new(iri.clone()));
        self.index.insert(iri, id);
        id
    }

    #[inline]
    pub fn get(&self, iri: &str) -> Option<ConceptId> {
        self.index.get(iri).copied()
    }

    #[inline]
    pub fn node(&self, id: ConceptId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: ConceptId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Record `narrower skos:broader broader` together with the inverse edge.
    pub fn link(&mut self, narrower: ConceptId, broader: ConceptId) {
        let child = self.node_mut(narrower);
        if !child.broader.contains(&broader) {
            child.broader.push(broader);
        }
        let parent = self.node_mut(broader);
        if !parent.narrower.contains(&narrower) {
            parent.narrower.push(narrower);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
