//! Ancestor closures and least-common-subsumer resolution
//!
//! Ancestor sets are true set unions over every upward path, so a concept
//! with several broader concepts (DAG) gets all of them. Each closure is
//! computed on first access and kept for the lifetime of the frozen
//! [`Taxonomy`]; the hierarchy cannot change while the memo is alive.

use crate::concept::ConceptId;
use crate::taxonomy::Taxonomy;
use once_cell::sync::OnceCell;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Lazily filled closure table, one slot per node.
#[derive(Debug)]
pub(crate) struct AncestorMemo {
    slots: Vec<OnceCell<Arc<[ConceptId]>>>,
}

impl AncestorMemo {
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| OnceCell::new()).collect(),
        }
    }

    /// Number of closures computed so far
    pub fn computed(&self) -> usize {
        self.slots.iter().filter(|s| s.get().is_some()).count()
    }
}

/// Least common subsumer of a concept pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lcs {
    pub concept: ConceptId,
    /// Cumulative frequency of `concept`; `f64::INFINITY` when the pair has no
    /// common ancestor and `concept` is the root fallback
    pub frequency: f64,
}

impl Taxonomy {
    /// All ancestors of `id` over broader edges, excluding `id` itself, sorted
    /// by id.
    pub fn ancestors(&self, id: ConceptId) -> Arc<[ConceptId]> {
        self.ancestors.slots[id.index()]
            .get_or_init(|| self.compute_ancestors(id))
            .clone()
    }

    /// True if `ancestor` is reachable from `id` over broader edges
    pub fn is_ancestor(&self, ancestor: ConceptId, id: ConceptId) -> bool {
        self.ancestors(id).binary_search(&ancestor).is_ok()
    }

    /// Ancestors of `id` plus `id` itself
    pub fn ancestors_or_self(&self, id: ConceptId) -> Vec<ConceptId> {
        let ancestors = self.ancestors(id);
        let mut out = Vec::with_capacity(ancestors.len() + 1);
        out.extend_from_slice(&ancestors);
        if let Err(pos) = out.binary_search(&id) {
            out.insert(pos, id);
        }
        out
    }

    /// Number of ancestor closures memoized so far
    pub fn memoized_ancestor_sets(&self) -> usize {
        self.ancestors.computed()
    }

    fn compute_ancestors(&self, start: ConceptId) -> Arc<[ConceptId]> {
        let mut visited: FxHashSet<ConceptId> = FxHashSet::default();
        let mut stack: Vec<ConceptId> = Vec::new();

        // Start is excluded even when a cycle leads back to it
        visited.insert(start);
        stack.extend_from_slice(self.broader(start));

        let mut result = Vec::new();
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            result.push(current);
            stack.extend_from_slice(self.broader(current));
        }
        result.sort_unstable();
        result.into()
    }

    /// Least common subsumer of `a` and `b`.
    ///
    /// - `a == b`: `a` itself.
    /// - one is an ancestor of the other: the ancestor.
    /// - otherwise: the shared ancestor with the minimum cumulative frequency.
    ///   On ties any other shared ancestor beats the root, then the lowest id
    ///   wins. With no shared ancestor the root is returned with infinite
    ///   frequency.
    pub fn lcs(&self, a: ConceptId, b: ConceptId) -> Lcs {
        if a == b {
            return Lcs {
                concept: a,
                frequency: self.cumulative_frequency(a),
            };
        }

        let ancestors_a = self.ancestors(a);
        let ancestors_b = self.ancestors(b);

        if ancestors_b.binary_search(&a).is_ok() {
            return Lcs {
                concept: a,
                frequency: self.cumulative_frequency(a),
            };
        }
        if ancestors_a.binary_search(&b).is_ok() {
            return Lcs {
                concept: b,
                frequency: self.cumulative_frequency(b),
            };
        }

        let mut best = Lcs {
            concept: self.root,
            frequency: f64::INFINITY,
        };
        let mut found = false;
        for common in sorted_intersection(&ancestors_a, &ancestors_b) {
            let frequency = self.cumulative_frequency(common);
            let better = !found
                || frequency < best.frequency
                || (frequency == best.frequency && best.concept == self.root);
            if better {
                best = Lcs {
                    concept: common,
                    frequency,
                };
                found = true;
            }
        }
        best
    }
}

/// Merge-intersect two sorted id slices
fn sorted_intersection<'a>(
    left: &'a [ConceptId],
    right: &'a [ConceptId],
) -> impl Iterator<Item = ConceptId> + 'a {
    let mut i = 0;
    let mut j = 0;
    std::iter::from_fn(move || {
        while i < left.len() && j < right.len() {
            match left[i].cmp(&right[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    let hit = left[i];
                    i += 1;
                    j += 1;
                    return Some(hit);
                }
            }
        }
        None
    })
}
