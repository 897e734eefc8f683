//! Error types for matrix building and the similarity cache

/// Result type alias for matrix operations
pub type Result<T> = std::result::Result<T, MatrixError>;

#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("Postcard serialization error: {0}")]
    Postcard(#[from] postcard::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid similarity cache format: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Core(#[from] thesaurus_core::Error),
}

impl MatrixError {
    /// Create an invalid format error
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        MatrixError::InvalidFormat(msg.into())
    }
}
