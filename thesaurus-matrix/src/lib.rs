//! # Thesaurus Matrix
//!
//! All-pairs concept similarity over a frozen [`Taxonomy`], stored as a
//! sparse symmetric matrix in a fixed leaf-first concept ordering.
//!
//! The sweep avoids most LCS searches:
//! - pairs from disjoint top-level clusters are assigned 0 outright
//! - once a pair scores 0, pairs drawn from the two ancestor-or-self sets are
//!   assigned 0 without scoring
//!
//! Built matrices are persisted in a versioned binary cache
//! ([`cache`]); [`load_or_build`] reuses it when present.
//!
//! [`Taxonomy`]: thesaurus_core::Taxonomy

pub mod builder;
pub mod cache;
pub mod clusters;
pub mod error;
pub mod order;
pub mod sparse;
pub mod zero_links;

pub use builder::{BuildStats, LinScorer, MatrixBuilder, MatrixOptions, PairScorer};
pub use cache::{
    cache_from_nested, load_or_build, read_cache, write_cache, CacheFile, NestedScores,
    SimilarityCache,
};
pub use clusters::Clusters;
pub use error::{MatrixError, Result};
pub use order::{concept_iris, concept_order};
pub use sparse::SparseMatrix;
pub use zero_links::ZeroLinks;
