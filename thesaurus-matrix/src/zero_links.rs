//! Zero-link memo for the pairwise sweep
//!
//! When two concepts score 0, every pair drawn from their ancestor-or-self
//! sets has no more informative common subsumer, so it scores 0 as well.
//! The sweep records such groups here and skips the pairs later.
//!
//! Concepts whose cumulative frequency reaches the root's are left out of
//! both sets. Two such concepts in an ancestor relation score 1 (both carry
//! no information), so linking them would change the result.

use rustc_hash::{FxHashMap, FxHashSet};
use thesaurus_core::{ConceptId, Taxonomy};

#[derive(Clone, Debug, Default)]
pub struct ZeroLinks {
    links: FxHashMap<ConceptId, FxHashSet<ConceptId>>,
}

impl ZeroLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `a` and `b` scored 0.
    pub fn record(&mut self, t: &Taxonomy, a: ConceptId, b: ConceptId) {
        let top = t.cumulative_frequency(t.root());
        let left = informative_ancestors_or_self(t, a, top);
        let right = informative_ancestors_or_self(t, b, top);
        self.record_sets(&left, &right);
    }

    /// Link every member of `left` with every member of `right`.
    pub fn record_sets(&mut self, left: &[ConceptId], right: &[ConceptId]) {
        if left.is_empty() || right.is_empty() {
            return;
        }
        for &x in left {
            self.links.entry(x).or_default().extend(right.iter().copied());
        }
        for &y in right {
            self.links.entry(y).or_default().extend(left.iter().copied());
        }
    }

    pub fn linked(&self, a: ConceptId, b: ConceptId) -> bool {
        self.links.get(&a).is_some_and(|s| s.contains(&b))
            || self.links.get(&b).is_some_and(|s| s.contains(&a))
    }

    /// Number of concepts with at least one link
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Ancestors-or-self of `id` below the root frequency `top`
fn informative_ancestors_or_self(t: &Taxonomy, id: ConceptId, top: f64) -> Vec<ConceptId> {
    t.ancestors_or_self(id)
        .into_iter()
        .filter(|&c| t.cumulative_frequency(c) < top)
        .collect()
}
