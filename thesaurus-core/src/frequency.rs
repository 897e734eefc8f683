//! Frequency aggregation
//!
//! Two mutually exclusive ways of filling cumulative frequencies:
//!
//! - **Additive propagation** ([`Taxonomy::add_frequencies`]): each observed
//!   occurrence record adds its count to the concept's own frequency and to
//!   the cumulative frequency of the concept and every ancestor. Not
//!   idempotent: applying the same record twice counts it twice.
//! - **Structural count** ([`Taxonomy::precompute_children`]): the cumulative
//!   frequency of each concept becomes the number of nodes reachable over
//!   narrower edges, itself included. Used when no occurrence data exists.
//!
//! Mixing the two on one taxonomy instance gives meaningless values.

use crate::concept::ConceptId;
use crate::source::ConceptFrequency;
use crate::taxonomy::Taxonomy;

/// Outcome of [`Taxonomy::ingest_frequencies`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IngestSummary {
    /// Records propagated
    pub applied: usize,
    /// Records with a count <= 0
    pub skipped_empty: usize,
    /// Records naming a concept the taxonomy does not track
    pub skipped_unknown: usize,
    /// Sum of all propagated counts
    pub total: f64,
}

impl Taxonomy {
    /// Own frequency, or the configured default when unset
    pub fn own_frequency(&self, id: ConceptId) -> f64 {
        self.table
            .node(id)
            .own_frequency
            .unwrap_or(self.config.default_frequency)
    }

    /// Cumulative frequency, or the configured default when unset
    pub fn cumulative_frequency(&self, id: ConceptId) -> f64 {
        self.table
            .node(id)
            .cum_frequency
            .unwrap_or(self.config.default_frequency)
    }

    /// Raw annotations, `None` when unset
    pub fn frequency_annotations(&self, id: ConceptId) -> (Option<f64>, Option<f64>) {
        let node = self.table.node(id);
        (node.own_frequency, node.cum_frequency)
    }

    /// Add `amount` occurrences to `id`.
    ///
    /// The own frequency of `id` grows by `amount`, and so does the cumulative
    /// frequency of `id` and of each of its ancestors. `explicit_ancestors`
    /// replaces the ancestor closure when the caller already has it; `id`
    /// itself is always included. Unset values start from
    /// `TaxonomyConfig::propagation_baseline`.
    pub fn add_frequencies(
        &mut self,
        id: ConceptId,
        amount: f64,
        explicit_ancestors: Option<&[ConceptId]>,
    ) {
        let baseline = self.config.propagation_baseline;

        let mut targets: Vec<ConceptId> = match explicit_ancestors {
            Some(ancestors) => ancestors.to_vec(),
            None => self.ancestors(id).to_vec(),
        };
        targets.push(id);
        targets.sort_unstable();
        targets.dedup();

        let node = self.table.node_mut(id);
        node.own_frequency = Some(node.own_frequency.unwrap_or(baseline) + amount);

        for target in targets {
            let node = self.table.node_mut(target);
            node.cum_frequency = Some(node.cum_frequency.unwrap_or(baseline) + amount);
        }
    }

    /// Propagate a batch of occurrence records.
    ///
    /// Records with a count <= 0 are skipped, as are records naming an IRI the
    /// taxonomy does not track.
    pub fn ingest_frequencies<'a, I>(&mut self, records: I) -> IngestSummary
    where
        I: IntoIterator<Item = &'a ConceptFrequency>,
    {
        let mut summary = IngestSummary::default();
        for record in records {
            if record.frequency <= 0.0 {
                summary.skipped_empty += 1;
                continue;
            }
            let Some(id) = self.id(&record.concept) else {
                tracing::warn!(concept = %record.concept, "frequency for unknown concept skipped");
                summary.skipped_unknown += 1;
                continue;
            };
            self.add_frequencies(id, record.frequency, None);
            summary.applied += 1;
            summary.total += record.frequency;
        }
        tracing::info!(
            applied = summary.applied,
            skipped_empty = summary.skipped_empty,
            skipped_unknown = summary.skipped_unknown,
            "frequencies ingested"
        );
        summary
    }

    /// Replace every concept's cumulative frequency by the number of nodes
    /// reachable from it over narrower edges, itself included.
    pub fn precompute_children(&mut self) {
        let concepts: Vec<ConceptId> = self.all_concepts().into_iter().collect();
        let counts: Vec<(ConceptId, usize)> = concepts
            .iter()
            .map(|&id| (id, self.descendants_or_self(id).len()))
            .collect();
        for (id, count) in counts {
            self.table.node_mut(id).cum_frequency = Some(count as f64);
        }
        tracing::debug!(concepts = concepts.len(), "structural counts precomputed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TaxonomyBuilder, TaxonomyConfig};

    /// `:T -> A -> A1`, `:T -> B`
    fn small() -> Taxonomy {
        let mut b = TaxonomyBuilder::new(TaxonomyConfig::default());
        b.add_path([("A", "A"), ("A1", "A1")]);
        b.add_path([("B", "B")]);
        b.build()
    }

    fn cum(t: &Taxonomy, iri: &str) -> f64 {
        t.cumulative_frequency(t.id(iri).unwrap())
    }

    #[test]
    fn test_defaults_when_unset() {
        let t = small();
        let a = t.id("A").unwrap();
        assert_eq!(t.own_frequency(a), 1.0);
        assert_eq!(t.cumulative_frequency(a), 1.0);
        assert_eq!(t.frequency_annotations(a), (None, None));
    }

    #[test]
    fn test_additive_propagation_scenario() {
        let mut t = small();
        let a1 = t.id("A1").unwrap();
        let b = t.id("B").unwrap();
        t.add_frequencies(a1, 4.0, None);
        t.add_frequencies(b, 6.0, None);

        assert_eq!(cum(&t, "A1"), 4.0);
        assert_eq!(cum(&t, "A"), 4.0);
        assert_eq!(cum(&t, "B"), 6.0);
        assert_eq!(cum(&t, ":T"), 10.0);
        assert_eq!(t.own_frequency(a1), 4.0);
        assert_eq!(t.own_frequency(b), 6.0);
    }

    #[test]
    fn test_propagation_touches_only_ancestors() {
        let mut t = small();
        let a = t.id("A").unwrap();
        t.add_frequencies(a, 3.0, None);
        // Descendant and sibling keep their (unset) values
        assert_eq!(t.frequency_annotations(t.id("A1").unwrap()), (None, None));
        assert_eq!(t.frequency_annotations(t.id("B").unwrap()), (None, None));
        assert_eq!(cum(&t, "A"), 3.0);
        assert_eq!(cum(&t, ":T"), 3.0);
    }

    #[test]
    fn test_double_application_double_counts() {
        let mut t = small();
        let a1 = t.id("A1").unwrap();
        t.add_frequencies(a1, 2.0, None);
        t.add_frequencies(a1, 2.0, None);
        assert_eq!(cum(&t, "A1"), 4.0);
        assert_eq!(cum(&t, ":T"), 4.0);
    }

    #[test]
    fn test_explicit_ancestor_set() {
        let mut t = small();
        let a1 = t.id("A1").unwrap();
        let a = t.id("A").unwrap();
        // Caller restricts propagation to A (root left out on purpose)
        t.add_frequencies(a1, 5.0, Some(&[a]));
        assert_eq!(cum(&t, "A1"), 5.0);
        assert_eq!(cum(&t, "A"), 5.0);
        assert_eq!(t.frequency_annotations(t.root()).1, None);
    }

    #[test]
    fn test_ingest_skips_empty_and_unknown() {
        let mut t = small();
        let records = vec![
            ConceptFrequency::new("A1", 4.0),
            ConceptFrequency::new("B", 0.0),
            ConceptFrequency::new("ex:missing", 9.0),
            ConceptFrequency::new("B", 6.0),
        ];
        let summary = t.ingest_frequencies(&records);
        assert_eq!(summary.applied, 2);
        assert_eq!(summary.skipped_empty, 1);
        assert_eq!(summary.skipped_unknown, 1);
        assert_eq!(summary.total, 10.0);
        assert_eq!(cum(&t, ":T"), 10.0);
        assert!(t.id("ex:missing").is_none());
    }

    #[test]
    fn test_precompute_children_counts_descendants() {
        let mut t = small();
        t.precompute_children();
        assert_eq!(cum(&t, "A1"), 1.0);
        assert_eq!(cum(&t, "A"), 2.0);
        assert_eq!(cum(&t, "B"), 1.0);
        assert_eq!(cum(&t, ":T"), 4.0);
    }

    #[test]
    fn test_precompute_children_counts_dag_nodes_once() {
        let mut b = TaxonomyBuilder::new(TaxonomyConfig::default());
        b.add_path([("A", "A"), ("B", "B"), ("D", "D")]);
        b.add_path([("A", "A"), ("C", "C"), ("D", "D")]);
        let mut t = b.build();
        t.precompute_children();
        assert_eq!(cum(&t, "A"), 4.0);
        assert_eq!(cum(&t, ":T"), 5.0);
    }
}
