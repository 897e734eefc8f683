//! Lin information-content similarity
//!
//! `sim(a, b) = 2 * ln(p(lcs)) / (ln(p(a)) + ln(p(b)))` where `p(c)` is the
//! cumulative frequency of `c` divided by the cumulative frequency of the
//! root.

use crate::ancestors::Lcs;
use crate::concept::ConceptId;
use crate::error::{Error, Result};
use crate::taxonomy::Taxonomy;

impl Taxonomy {
    /// Lin similarity of `a` and `b`, in `[0, 1]`.
    ///
    /// Identical concepts score 1. Pairs whose least common subsumer is the
    /// root score 0. A pair where both concepts are as frequent as the root
    /// scores 1. Any result outside `[0, 1]` means an ancestor has a lower
    /// cumulative frequency than one of its descendants and is reported as
    /// [`Error::SimilarityOutOfRange`].
    pub fn lin_similarity(&self, a: ConceptId, b: ConceptId) -> Result<f64> {
        if a == b {
            return Ok(1.0);
        }

        let Lcs {
            concept: lcs,
            frequency: lcs_freq,
        } = self.lcs(a, b);
        if lcs == self.root {
            return Ok(0.0);
        }

        let top_freq = self.cumulative_frequency(self.root);
        let p1 = (self.cumulative_frequency(a) / top_freq).ln();
        let p2 = (self.cumulative_frequency(b) / top_freq).ln();
        let p_lcs = (lcs_freq / top_freq).ln();

        if p1 + p2 == 0.0 {
            return Ok(1.0);
        }

        let score = 2.0 * p_lcs / (p1 + p2);
        if !(0.0..=1.0).contains(&score) {
            return Err(Error::SimilarityOutOfRange {
                a: self.iri(a).to_string(),
                b: self.iri(b).to_string(),
                lcs: self.iri(lcs).to_string(),
                score,
            });
        }
        Ok(score)
    }

    /// [`lin_similarity`](Self::lin_similarity) addressed by IRI
    pub fn similarity_by_iri(&self, a: &str, b: &str) -> Result<f64> {
        let a = self.id(a).ok_or_else(|| Error::unknown_concept(a))?;
        let b = self.id(b).ok_or_else(|| Error::unknown_concept(b))?;
        self.lin_similarity(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TaxonomyBuilder, TaxonomyConfig};

    /// `:T -> A -> A1`, `:T -> B` with A1=4, B=6 propagated
    fn scenario() -> Taxonomy {
        let mut b = TaxonomyBuilder::new(TaxonomyConfig::default());
        b.add_path([("A", "A"), ("A1", "A1")]);
        b.add_path([("B", "B")]);
        let mut t = b.build();
        let a1 = t.id("A1").unwrap();
        let bb = t.id("B").unwrap();
        t.add_frequencies(a1, 4.0, None);
        t.add_frequencies(bb, 6.0, None);
        t
    }

    #[test]
    fn test_identity_is_one() {
        let t = scenario();
        for id in t.all_concepts() {
            assert_eq!(t.lin_similarity(id, id).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_cross_branch_is_zero() {
        let t = scenario();
        assert_eq!(t.similarity_by_iri("A1", "B").unwrap(), 0.0);
    }

    #[test]
    fn test_same_branch_beats_cross_branch() {
        let t = scenario();
        let same = t.similarity_by_iri("A1", "A").unwrap();
        let cross = t.similarity_by_iri("A1", "B").unwrap();
        assert!(same > 0.0 && same <= 1.0);
        assert!(same > cross);
    }

    #[test]
    fn test_symmetry_and_range() {
        let t = scenario();
        let ids: Vec<ConceptId> = t.all_concepts().into_iter().collect();
        for &a in &ids {
            for &b in &ids {
                let ab = t.lin_similarity(a, b).unwrap();
                let ba = t.lin_similarity(b, a).unwrap();
                assert_eq!(ab, ba);
                assert!((0.0..=1.0).contains(&ab));
            }
        }
    }

    #[test]
    fn test_intermediate_value() {
        // :T(10) -> A(8) -> {A1(4), A2(4)}
        let mut b = TaxonomyBuilder::new(TaxonomyConfig::default());
        b.add_path([("A", "A"), ("A1", "A1")]);
        b.add_path([("A", "A"), ("A2", "A2")]);
        b.add_path([("B", "B")]);
        let mut t = b.build();
        for (iri, n) in [("A1", 4.0), ("A2", 4.0), ("B", 2.0)] {
            let id = t.id(iri).unwrap();
            t.add_frequencies(id, n, None);
        }
        let got = t.similarity_by_iri("A1", "A2").unwrap();
        let expected = 2.0 * (0.8f64).ln() / (2.0 * (0.4f64).ln());
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_frequencies_score_one() {
        // Nothing annotated: every frequency equals the default, as does the root
        let mut b = TaxonomyBuilder::new(TaxonomyConfig::default());
        b.add_path([("A", "A"), ("A1", "A1")]);
        b.add_path([("A", "A"), ("A2", "A2")]);
        let t = b.build();
        assert_eq!(t.similarity_by_iri("A1", "A2").unwrap(), 1.0);
    }

    #[test]
    fn test_non_monotone_frequencies_are_an_error() {
        let mut b = TaxonomyBuilder::new(TaxonomyConfig::default());
        b.add_path([("A", "A"), ("A1", "A1")]);
        b.add_path([("A", "A"), ("A2", "A2")]);
        b.set_cumulative_frequency(":T", 100.0);
        b.set_cumulative_frequency("A", 1.0);
        b.set_cumulative_frequency("A1", 50.0);
        b.set_cumulative_frequency("A2", 50.0);
        let t = b.build();
        let err = t.similarity_by_iri("A1", "A2").unwrap_err();
        assert!(matches!(err, Error::SimilarityOutOfRange { .. }));
    }

    #[test]
    fn test_unknown_iri() {
        let t = scenario();
        let err = t.similarity_by_iri("A1", "nope").unwrap_err();
        assert!(matches!(err, Error::UnknownConcept(ref iri) if iri == "nope"));
    }
}
