//! Error types for thesaurus-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Concept IRI not present in the taxonomy
    #[error("Unknown concept: {0}")]
    UnknownConcept(String),

    /// Taxonomy document could not be interpreted
    #[error("Invalid taxonomy document: {0}")]
    InvalidDocument(String),

    /// Lin similarity outside [0, 1]; an ancestor has a lower cumulative
    /// frequency than one of its descendants
    #[error("Similarity of <{a}> and <{b}> is {score} (LCS <{lcs}>); frequencies are not monotone")]
    SimilarityOutOfRange {
        a: String,
        b: String,
        lcs: String,
        score: f64,
    },

    /// Ranking method not recognized
    #[error("Ranking method '{0}' is not supported (expected 'pr', 'pagerank' or 'betweenness')")]
    UnsupportedRankingMethod(String),

    /// Failure reported by an external collaborator (taxonomy, frequency or
    /// history source)
    #[error("Source error: {0}")]
    Source(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unknown concept error
    pub fn unknown_concept(iri: impl Into<String>) -> Self {
        Error::UnknownConcept(iri.into())
    }

    /// Create an invalid document error
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Error::InvalidDocument(msg.into())
    }

    /// Create a source error
    pub fn source(msg: impl Into<String>) -> Self {
        Error::Source(msg.into())
    }
}
