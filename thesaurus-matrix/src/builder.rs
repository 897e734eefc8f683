//! Pairwise similarity sweep
//!
//! Walks the upper triangle of the concept ordering and scores each pair,
//! skipping pairs that are known to score 0:
//!
//! - **cluster pruning**: the two concepts share no top-level cluster
//! - **zero-link pruning**: an earlier zero score already covers the pair
//!   (see [`ZeroLinks`])
//!
//! Neither shortcut changes a score, so pruned, exhaustive and parallel
//! sweeps produce the same matrix. Only exact zeros feed the zero-link
//! memo; a tiny positive score says nothing about the ancestors' scores.
//!
//! Every stored score is mirrored, and the diagonal is always 1.

use crate::cache::SimilarityCache;
use crate::clusters::Clusters;
use crate::error::Result;
use crate::order::{concept_iris, concept_order};
use crate::sparse::SparseMatrix;
use crate::zero_links::ZeroLinks;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thesaurus_core::{ConceptId, Taxonomy};

/// Sweep switches
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixOptions {
    /// Treat pairs from disjoint top-level clusters as unrelated
    pub cluster_pruning: bool,
    /// Reuse earlier zero scores for pairs drawn from the same ancestor sets
    pub zero_link_pruning: bool,
    /// Sweep rows on the rayon pool
    pub parallel: bool,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            cluster_pruning: true,
            zero_link_pruning: true,
            parallel: false,
        }
    }
}

/// Scores one concept pair.
pub trait PairScorer: Sync {
    fn score(&self, taxonomy: &Taxonomy, a: ConceptId, b: ConceptId) -> thesaurus_core::Result<f64>;
}

/// Lin information-content similarity
#[derive(Clone, Copy, Debug, Default)]
pub struct LinScorer;

impl PairScorer for LinScorer {
    fn score(&self, taxonomy: &Taxonomy, a: ConceptId, b: ConceptId) -> thesaurus_core::Result<f64> {
        taxonomy.lin_similarity(a, b)
    }
}

/// Counters collected during a sweep
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Pairs handed to the scorer
    pub pairs_scored: usize,
    pub cluster_pruned: usize,
    pub zero_link_pruned: usize,
}

impl BuildStats {
    fn absorb(&mut self, other: BuildStats) {
        self.pairs_scored += other.pairs_scored;
        self.cluster_pruned += other.cluster_pruned;
        self.zero_link_pruned += other.zero_link_pruned;
    }

    /// Off-diagonal pairs visited
    pub fn total_pairs(&self) -> usize {
        self.pairs_scored + self.cluster_pruned + self.zero_link_pruned
    }
}

type Triplet = (u32, u32, f64);

pub struct MatrixBuilder<'a> {
    taxonomy: &'a Taxonomy,
    options: MatrixOptions,
    order: Vec<ConceptId>,
    clusters: Clusters,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(taxonomy: &'a Taxonomy, options: MatrixOptions) -> Self {
        Self {
            taxonomy,
            options,
            order: concept_order(taxonomy),
            clusters: Clusters::new(taxonomy),
        }
    }

    /// Concepts in row order
    pub fn concepts(&self) -> &[ConceptId] {
        &self.order
    }

    pub fn options(&self) -> MatrixOptions {
        self.options
    }

    /// Sweep with Lin similarity.
    pub fn build(&self) -> Result<(SimilarityCache, BuildStats)> {
        self.build_with(&LinScorer)
    }

    pub fn build_with(&self, scorer: &dyn PairScorer) -> Result<(SimilarityCache, BuildStats)> {
        let n = self.order.len();
        let _span = tracing::info_span!("similarity_matrix", concepts = n).entered();
        tracing::info!(
            leaves = self.taxonomy.leaves().len(),
            clusters = self.clusters.len(),
            parallel = self.options.parallel,
            "building similarity matrix"
        );

        let mut triplets: Vec<Triplet> = Vec::new();
        let mut stats = BuildStats::default();

        if self.options.parallel {
            // Each rayon job carries its own zero-link shard
            let rows: Vec<(Vec<Triplet>, BuildStats)> = (0..n)
                .into_par_iter()
                .map_init(ZeroLinks::new, |zero_links, i| -> Result<(Vec<Triplet>, BuildStats)> {
                    let mut row = Vec::new();
                    let mut row_stats = BuildStats::default();
                    self.sweep_row(i, scorer, zero_links, &mut row_stats, &mut row)?;
                    Ok((row, row_stats))
                })
                .collect::<Result<Vec<_>>>()?;
            for (row, row_stats) in rows {
                triplets.extend(row);
                stats.absorb(row_stats);
            }
        } else {
            let mut zero_links = ZeroLinks::new();
            for i in 0..n {
                self.sweep_row(i, scorer, &mut zero_links, &mut stats, &mut triplets)?;
            }
            tracing::debug!(linked_concepts = zero_links.len(), "zero-link memo size");
        }

        let matrix = SparseMatrix::from_triplets(n as u32, triplets)?;
        tracing::info!(
            nnz = matrix.nnz(),
            scored = stats.pairs_scored,
            cluster_pruned = stats.cluster_pruned,
            zero_link_pruned = stats.zero_link_pruned,
            "similarity matrix built"
        );
        let cache = SimilarityCache {
            matrix,
            concepts: concept_iris(self.taxonomy, &self.order),
        };
        Ok((cache, stats))
    }

    /// Score row `i` against every later column.
    fn sweep_row(
        &self,
        i: usize,
        scorer: &dyn PairScorer,
        zero_links: &mut ZeroLinks,
        stats: &mut BuildStats,
        out: &mut Vec<Triplet>,
    ) -> Result<()> {
        let start = Instant::now();
        let before = *stats;
        let a = self.order[i];
        out.push((i as u32, i as u32, 1.0));

        for (j, &b) in self.order.iter().enumerate().skip(i + 1) {
            if self.options.cluster_pruning && !self.clusters.shares_cluster(a, b) {
                stats.cluster_pruned += 1;
                continue;
            }
            if self.options.zero_link_pruning && zero_links.linked(a, b) {
                stats.zero_link_pruned += 1;
                continue;
            }

            let score = scorer.score(self.taxonomy, a, b)?;
            stats.pairs_scored += 1;
            if score == 0.0 && self.options.zero_link_pruning {
                zero_links.record(self.taxonomy, a, b);
            }
            if score != 0.0 {
                out.push((i as u32, j as u32, score));
                out.push((j as u32, i as u32, score));
            }
        }

        tracing::debug!(
            row = i,
            concept = self.taxonomy.iri(a),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            zero_link_shortcuts = stats.zero_link_pruned - before.zero_link_pruned,
            cluster_shortcuts = stats.cluster_pruned - before.cluster_pruned,
            "row done"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thesaurus_core::{TaxonomyBuilder, TaxonomyConfig};

    /// `:T -> A -> {A1 -> A11, A2}` where A carries the full root frequency,
    /// so every pair whose LCS is A scores 0 and A never enters the
    /// zero-link memo.
    fn saturated() -> Taxonomy {
        let mut b = TaxonomyBuilder::new(TaxonomyConfig::default());
        b.add_path([("ex:A", "A"), ("ex:A1", "A1"), ("ex:A11", "A11")]);
        b.add_path([("ex:A", "A"), ("ex:A2", "A2")]);
        let mut t = b.build();
        let a11 = t.id("ex:A11").unwrap();
        let a2 = t.id("ex:A2").unwrap();
        t.add_frequencies(a11, 4.0, None);
        t.add_frequencies(a2, 6.0, None);
        t
    }

    #[test]
    fn test_options_default() {
        let o = MatrixOptions::default();
        assert!(o.cluster_pruning);
        assert!(o.zero_link_pruning);
        assert!(!o.parallel);
    }

    #[test]
    fn test_zero_link_shortcuts() {
        let t = saturated();
        let builder = MatrixBuilder::new(&t, MatrixOptions::default());
        let (cache, stats) = builder.build().unwrap();

        // Order: A11, A2 (leaves), then :T, A, A1
        assert_eq!(cache.concepts, vec!["ex:A11", "ex:A2", ":T", "ex:A", "ex:A1"]);
        assert_eq!(stats.total_pairs(), 10);
        assert_eq!(stats.cluster_pruned, 4);
        // A11/A2 scores 0 and links {A11, A1} with {A2}, covering A2/A1
        assert_eq!(stats.zero_link_pruned, 1);
        assert_eq!(stats.pairs_scored, 5);

        // Diagonal plus the mirrored A11/A1 pair
        assert_eq!(cache.matrix.nnz(), 7);
        assert_eq!(cache.matrix.get(0, 4), 1.0);
        assert_eq!(cache.matrix.get(4, 0), 1.0);
    }

    #[test]
    fn test_pruning_does_not_change_scores() {
        let t = saturated();
        let (pruned, _) = MatrixBuilder::new(&t, MatrixOptions::default())
            .build()
            .unwrap();
        let exhaustive_opts = MatrixOptions {
            cluster_pruning: false,
            zero_link_pruning: false,
            parallel: false,
        };
        let (exhaustive, stats) = MatrixBuilder::new(&t, exhaustive_opts).build().unwrap();

        assert_eq!(stats.pairs_scored, 10);
        assert_eq!(pruned, exhaustive);
    }

    #[test]
    fn test_diagonal_is_one_for_every_concept() {
        let t = saturated();
        let (cache, _) = MatrixBuilder::new(&t, MatrixOptions::default())
            .build()
            .unwrap();
        for i in 0..cache.matrix.dim() {
            assert_eq!(cache.matrix.get(i, i), 1.0);
        }
        assert!(cache.matrix.is_symmetric());
    }
}
