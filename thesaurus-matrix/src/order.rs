//! Row/column ordering of the similarity matrix
//!
//! Leaves come first, then every other concept; each group is sorted by IRI.
//! Cached matrices are only meaningful against this exact ordering.

use thesaurus_core::{ConceptId, Taxonomy};

pub fn concept_order(t: &Taxonomy) -> Vec<ConceptId> {
    let leaves = t.leaves();
    let mut leaf_ids: Vec<ConceptId> = leaves.iter().copied().collect();
    let mut rest: Vec<ConceptId> = t
        .all_concepts()
        .into_iter()
        .filter(|id| !leaves.contains(id))
        .collect();
    leaf_ids.sort_by(|a, b| t.iri(*a).cmp(t.iri(*b)));
    rest.sort_by(|a, b| t.iri(*a).cmp(t.iri(*b)));
    leaf_ids.extend(rest);
    leaf_ids
}

/// IRIs in matrix order
pub fn concept_iris(t: &Taxonomy, order: &[ConceptId]) -> Vec<String> {
    order.iter().map(|&id| t.iri(id).to_string()).collect()
}
