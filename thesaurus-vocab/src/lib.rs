//! SKOS Vocabulary Constants and Internal Sentinels for Thesaurus Crates
//!
//! This crate provides a centralized location for the IRIs and compact IRIs
//! used when reading and writing SKOS taxonomies, plus the reserved internal
//! identifiers the thesaurus uses for bookkeeping (root concept, scheme,
//! frequency annotations).
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `skos` - SKOS core vocabulary (http://www.w3.org/2004/02/skos/core#)
//! - `skos_names` - SKOS local names, for matching compact IRIs
//! - `jsonld` - JSON-LD keywords used by the snapshot codec
//! - `internal` - reserved identifiers that never leave the thesaurus

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// SKOS core vocabulary constants
pub mod skos {
    /// SKOS namespace IRI
    pub const NS: &str = "http://www.w3.org/2004/02/skos/core#";

    /// Older SKOS namespace still found in exported documents
    pub const NS_2008: &str = "http://www.w3.org/2008/05/skos#";

    /// Compact prefix bound to [`NS`] in written documents
    pub const PREFIX: &str = "skos";

    /// skos:Concept IRI
    pub const CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";

    /// skos:ConceptScheme IRI
    pub const CONCEPT_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#ConceptScheme";

    /// skos:prefLabel IRI
    pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";

    /// skos:altLabel IRI
    pub const ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";

    /// skos:hiddenLabel IRI
    pub const HIDDEN_LABEL: &str = "http://www.w3.org/2004/02/skos/core#hiddenLabel";

    /// skos:broader IRI
    pub const BROADER: &str = "http://www.w3.org/2004/02/skos/core#broader";

    /// skos:narrower IRI
    pub const NARROWER: &str = "http://www.w3.org/2004/02/skos/core#narrower";

    /// skos:related IRI
    pub const RELATED: &str = "http://www.w3.org/2004/02/skos/core#related";

    /// skos:topConceptOf IRI
    pub const TOP_CONCEPT_OF: &str = "http://www.w3.org/2004/02/skos/core#topConceptOf";

    /// skos:hasTopConcept IRI
    pub const HAS_TOP_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#hasTopConcept";
}

/// SKOS local names
pub mod skos_names {
    pub const CONCEPT: &str = "Concept";
    pub const CONCEPT_SCHEME: &str = "ConceptScheme";
    pub const PREF_LABEL: &str = "prefLabel";
    pub const ALT_LABEL: &str = "altLabel";
    pub const HIDDEN_LABEL: &str = "hiddenLabel";
    pub const BROADER: &str = "broader";
    pub const NARROWER: &str = "narrower";
    pub const RELATED: &str = "related";
    pub const TOP_CONCEPT_OF: &str = "topConceptOf";
    pub const HAS_TOP_CONCEPT: &str = "hasTopConcept";
}

/// JSON-LD keywords
pub mod jsonld {
    pub const CONTEXT: &str = "@context";
    pub const GRAPH: &str = "@graph";
    pub const ID: &str = "@id";
    pub const TYPE: &str = "@type";
    pub const VALUE: &str = "@value";
    pub const LANGUAGE: &str = "@language";
}

/// Reserved internal identifiers
///
/// Every internal identifier and every internal label starts with
/// [`SENTINEL_PREFIX`]. Labels carrying the prefix are never reported to
/// callers.
pub mod internal {
    /// Prefix shared by all internal identifiers and labels
    pub const SENTINEL_PREFIX: &str = ":";

    /// Root concept ("Top"), the universal ancestor
    pub const TOP: &str = ":T";

    /// Internal concept scheme the root is the top concept of
    pub const SCHEME: &str = ":scheme";

    /// Own-frequency annotation predicate
    pub const OWN_FREQUENCY: &str = ":own_frequency";

    /// Cumulative-frequency annotation predicate
    pub const CUM_FREQUENCY: &str = ":cum_frequency";

    /// Returns true if `text` is reserved for internal bookkeeping.
    #[inline]
    pub fn is_sentinel(text: &str) -> bool {
        text.starts_with(SENTINEL_PREFIX)
    }
}

/// Resolve a SKOS property or class written either as a full IRI (current or
/// 2008 namespace) or as a `skos:` compact IRI to its local name.
///
/// Returns `None` for anything outside the SKOS namespace.
pub fn skos_local_name(term: &str) -> Option<&str> {
    if let Some(local) = term.strip_prefix(skos::NS) {
        return Some(local);
    }
    if let Some(local) = term.strip_prefix(skos::NS_2008) {
        return Some(local);
    }
    term.strip_prefix("skos:")
}
