//! Concept importance ranking
//!
//! Centrality algorithms are provided by an external [`CentralityRanker`].
//! This module validates the requested method and builds the labelled
//! narrower -> broader graph handed to it.

use crate::error::{Error, Result};
use crate::taxonomy::Taxonomy;
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;

/// Supported centrality measures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RankingMethod {
    PageRank,
    Betweenness,
}

impl FromStr for RankingMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pr" | "pagerank" => Ok(RankingMethod::PageRank),
            "betweenness" => Ok(RankingMethod::Betweenness),
            other => Err(Error::UnsupportedRankingMethod(other.to_string())),
        }
    }
}

impl fmt::Display for RankingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingMethod::PageRank => f.write_str("pr"),
            RankingMethod::Betweenness => f.write_str("betweenness"),
        }
    }
}

/// Directed graph of concept display names
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelGraph {
    pub nodes: Vec<String>,
    /// `(narrower, broader)` pairs
    pub edges: Vec<(String, String)>,
}

/// Computes a centrality score per node.
pub trait CentralityRanker {
    fn rank(&self, method: RankingMethod, graph: &LabelGraph) -> Result<FxHashMap<String, f64>>;
}

/// Display name of a node: its first preferred label, or its IRI
fn display_name(t: &Taxonomy, id: crate::ConceptId) -> String {
    t.pref_label(id).unwrap_or_else(|| t.iri(id)).to_string()
}

/// Labelled hierarchy of all concepts
pub fn label_graph(t: &Taxonomy) -> LabelGraph {
    let nodes = t
        .all_concepts()
        .into_iter()
        .map(|id| display_name(t, id))
        .collect();
    let edges = t
        .graph_edges(false)
        .into_iter()
        .map(|(narrower, broader)| (display_name(t, narrower), display_name(t, broader)))
        .collect();
    LabelGraph { nodes, edges }
}

/// Rank concepts by `method` (`"pr"`, `"pagerank"` or `"betweenness"`).
///
/// An unknown method fails before any work is done.
pub fn importance_ranking(
    t: &Taxonomy,
    method: &str,
    ranker: &dyn CentralityRanker,
) -> Result<FxHashMap<String, f64>> {
    let method: RankingMethod = method.parse()?;
    let graph = label_graph(t);
    tracing::debug!(%method, nodes = graph.nodes.len(), edges = graph.edges.len(), "ranking concepts");
    ranker.rank(method, &graph)
}
