//! # Thesaurus Core
//!
//! Semantic similarity over a SKOS concept hierarchy.
//!
//! This crate provides:
//! - A taxonomy store with an explicit build-then-query split
//!   ([`TaxonomyBuilder`] -> [`Taxonomy`])
//! - Memoized ancestor closures and least-common-subsumer resolution
//! - Frequency aggregation, either additive (observed occurrence counts) or
//!   structural (descendant counts)
//! - Lin information-content similarity
//! - JSON-LD snapshot reading/writing and the collaborator traits used to
//!   fetch taxonomies and frequencies
//!
//! ## Example
//!
//! ```
//! use thesaurus_core::{TaxonomyBuilder, TaxonomyConfig};
//!
//! let mut builder = TaxonomyBuilder::new(TaxonomyConfig::default());
//! builder.add_path([("ex:A", "A"), ("ex:A1", "A1")]);
//! builder.add_path([("ex:B", "B")]);
//! let mut taxonomy = builder.build();
//!
//! let a1 = taxonomy.id("ex:A1").unwrap();
//! let b = taxonomy.id("ex:B").unwrap();
//! taxonomy.add_frequencies(a1, 4.0, None);
//! taxonomy.add_frequencies(b, 6.0, None);
//!
//! assert_eq!(taxonomy.lin_similarity(a1, b).unwrap(), 0.0);
//! assert!(taxonomy.similarity_by_iri("ex:A1", "ex:A").unwrap() > 0.0);
//! ```

pub mod ancestors;
pub mod concept;
pub mod config;
pub mod error;
pub mod frequency;
pub mod loader;
pub mod ranking;
pub mod similarity;
pub mod snapshot;
pub mod source;
pub mod taxonomy;

pub use ancestors::Lcs;
pub use concept::{ConceptId, ConceptLabels, Label, LabelKind};
pub use config::TaxonomyConfig;
pub use error::{Error, Result};
pub use frequency::IngestSummary;
pub use loader::{load_taxonomy, query_taxonomy, LoadOptions};
pub use ranking::{importance_ranking, CentralityRanker, LabelGraph, RankingMethod};
pub use snapshot::{load_snapshot, read_document, save_snapshot, write_document};
pub use source::{
    check_outdated, ConceptFrequency, FileFrequencySource, FileHistorySource, FileTaxonomySource,
    FrequencySource, HistoryEvent, HistorySource, TaxonomySource,
};
pub use taxonomy::{Taxonomy, TaxonomyBuilder};
