//! Similarity cache file
//!
//! Layout: 4 magic bytes `TSIM`, one version byte, a 4-byte big-endian
//! payload length, then the postcard payload.
//!
//! - Version 1: legacy nested scores `{row -> {col -> score}}` without a
//!   concept list. Converted on load against the current taxonomy's ordering,
//!   starting from the identity.
//! - Version 2: the matrix plus its ordered concept IRIs. Written by
//!   [`serialize`].

use crate::builder::{MatrixBuilder, MatrixOptions};
use crate::error::{MatrixError, Result};
use crate::order::{concept_iris, concept_order};
use crate::sparse::SparseMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thesaurus_core::Taxonomy;

const CACHE_MAGIC: &[u8; 4] = b"TSIM";

/// Legacy nested-mapping version
const CACHE_VERSION_NESTED: u8 = 1;

/// Matrix plus concept list
const CACHE_VERSION_CANONICAL: u8 = 2;

const HEADER_LEN: usize = 9;

/// Legacy nested scores, keyed by row then column index
pub type NestedScores = BTreeMap<u32, BTreeMap<u32, f64>>;

/// Pairwise similarities and the concept IRI behind each row/column
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityCache {
    pub matrix: SparseMatrix,
    pub concepts: Vec<String>,
}

impl SimilarityCache {
    /// Number of concepts
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Row/column index of a concept
    pub fn index_of(&self, iri: &str) -> Option<usize> {
        self.concepts.iter().position(|c| c == iri)
    }

    /// Cached similarity of two concepts, `None` if either is not cached
    pub fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.matrix.get(i as u32, j as u32))
    }

    fn validate(&self) -> Result<()> {
        self.matrix.validate()?;
        if self.matrix.dim() as usize != self.concepts.len() {
            return Err(MatrixError::invalid_format(format!(
                "matrix dimension {} does not match {} concepts",
                self.matrix.dim(),
                self.concepts.len()
            )));
        }
        Ok(())
    }
}

/// A decoded cache file in either supported shape
#[derive(Clone, Debug, PartialEq)]
pub enum CacheFile {
    Canonical(SimilarityCache),
    Nested(NestedScores),
}

impl CacheFile {
    /// Resolve to a [`SimilarityCache`]; nested scores are laid out over the
    /// current ordering of `taxonomy`.
    pub fn into_cache(self, taxonomy: &Taxonomy) -> Result<SimilarityCache> {
        match self {
            CacheFile::Canonical(cache) => Ok(cache),
            CacheFile::Nested(scores) => cache_from_nested(&scores, taxonomy),
        }
    }
}

/// Convert legacy nested scores using the leaf-first ordering of `taxonomy`.
pub fn cache_from_nested(scores: &NestedScores, taxonomy: &Taxonomy) -> Result<SimilarityCache> {
    let order = concept_order(taxonomy);
    let dim = order.len() as u32;

    let mut triplets: Vec<(u32, u32, f64)> = (0..dim).map(|i| (i, i, 1.0)).collect();
    for (&row, cols) in scores {
        for (&col, &score) in cols {
            triplets.push((row, col, score));
        }
    }
    let matrix = SparseMatrix::from_triplets(dim, triplets)?;
    tracing::info!(concepts = dim, nnz = matrix.nnz(), "converted nested similarity cache");
    Ok(SimilarityCache {
        matrix,
        concepts: concept_iris(taxonomy, &order),
    })
}

fn frame(version: u8, payload: Vec<u8>) -> Vec<u8> {
    let mut data = Vec::with_capacity(HEADER_LEN + payload.len());
    data.extend_from_slice(CACHE_MAGIC);
    data.push(version);
    data.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    data.extend_from_slice(&payload);
    data
}

/// Encode a cache in the current format.
pub fn serialize(cache: &SimilarityCache) -> Result<Vec<u8>> {
    Ok(frame(CACHE_VERSION_CANONICAL, postcard::to_allocvec(cache)?))
}

/// Encode nested scores in the legacy version 1 format.
pub fn serialize_nested(scores: &NestedScores) -> Result<Vec<u8>> {
    Ok(frame(CACHE_VERSION_NESTED, postcard::to_allocvec(scores)?))
}

/// Decode a cache file of either version.
pub fn deserialize(data: &[u8]) -> Result<CacheFile> {
    if data.len() < HEADER_LEN {
        return Err(MatrixError::invalid_format("data too short for header"));
    }
    if &data[0..4] != CACHE_MAGIC {
        return Err(MatrixError::invalid_format("invalid magic bytes"));
    }

    let version = data[4];
    let len = u32::from_be_bytes([data[5], data[6], data[7], data[8]]) as usize;
    if data.len() < HEADER_LEN + len {
        return Err(MatrixError::invalid_format("data truncated"));
    }
    if data.len() > HEADER_LEN + len {
        return Err(MatrixError::invalid_format(format!(
            "{} trailing bytes after payload",
            data.len() - HEADER_LEN - len
        )));
    }
    let payload = &data[HEADER_LEN..HEADER_LEN + len];

    match version {
        CACHE_VERSION_NESTED => Ok(CacheFile::Nested(postcard::from_bytes(payload)?)),
        CACHE_VERSION_CANONICAL => {
            let cache: SimilarityCache = postcard::from_bytes(payload)?;
            cache.validate()?;
            Ok(CacheFile::Canonical(cache))
        }
        _ => Err(MatrixError::invalid_format(format!(
            "unsupported version: {} (expected {} or {})",
            version, CACHE_VERSION_NESTED, CACHE_VERSION_CANONICAL
        ))),
    }
}

pub fn write_cache(cache: &SimilarityCache, path: &Path) -> Result<()> {
    let data = serialize(cache)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)?;
    tracing::debug!(path = %path.display(), concepts = cache.len(), "wrote similarity cache");
    Ok(())
}

/// Read a cache file, converting the legacy shape against `taxonomy`.
pub fn read_cache(path: &Path, taxonomy: &Taxonomy) -> Result<SimilarityCache> {
    let data = fs::read(path)?;
    deserialize(&data)?.into_cache(taxonomy)
}

/// Reuse the cache at `path` unless `refresh` is set; otherwise build the
/// matrix and write it to `path` when one is given.
pub fn load_or_build(
    path: Option<&Path>,
    taxonomy: &Taxonomy,
    refresh: bool,
    options: MatrixOptions,
) -> Result<SimilarityCache> {
    if let Some(path) = path {
        if path.exists() && !refresh {
            tracing::info!(path = %path.display(), "similarity cache exists, loading");
            return read_cache(path, taxonomy);
        }
    }

    let (cache, _stats) = MatrixBuilder::new(taxonomy, options).build()?;
    if let Some(path) = path {
        write_cache(&cache, path)?;
    }
    Ok(cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thesaurus_core::{TaxonomyBuilder, TaxonomyConfig};

    fn sample() -> SimilarityCache {
        SimilarityCache {
            matrix: SparseMatrix::from_triplets(
                2,
                vec![(0, 0, 1.0), (0, 1, 0.25), (1, 0, 0.25), (1, 1, 1.0)],
            )
            .unwrap(),
            concepts: vec!["ex:a".to_string(), "ex:b".to_string()],
        }
    }

    #[test]
    fn test_header_layout() {
        let data = serialize(&sample()).unwrap();
        assert_eq!(&data[0..4], b"TSIM");
        assert_eq!(data[4], CACHE_VERSION_CANONICAL);
        let len = u32::from_be_bytes([data[5], data[6], data[7], data[8]]) as usize;
        assert_eq!(data.len(), HEADER_LEN + len);
    }

    #[test]
    fn test_canonical_roundtrip() {
        let cache = sample();
        let data = serialize(&cache).unwrap();
        assert_eq!(deserialize(&data).unwrap(), CacheFile::Canonical(cache.clone()));
        assert_eq!(cache.similarity("ex:a", "ex:b"), Some(0.25));
        assert_eq!(cache.similarity("ex:a", "ex:zzz"), None);
    }

    #[test]
    fn test_invalid_magic() {
        let err = deserialize(b"XXXX\x02\x00\x00\x00\x00").unwrap_err();
        assert!(matches!(err, MatrixError::InvalidFormat(_)));
    }

    #[test]
    fn test_unknown_version_lists_supported() {
        let data = frame(7, Vec::new());
        match deserialize(&data) {
            Err(MatrixError::InvalidFormat(msg)) => {
                assert!(msg.contains('1') && msg.contains('2'), "{msg}");
            }
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated() {
        let data = serialize(&sample()).unwrap();
        let err = deserialize(&data[..data.len() - 3]).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidFormat(_)));
        let err = deserialize(&data[..4]).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidFormat(_)));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut data = serialize(&sample()).unwrap();
        data.extend_from_slice(b"junk");
        match deserialize(&data) {
            Err(MatrixError::InvalidFormat(msg)) => assert!(msg.contains("trailing"), "{msg}"),
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut cache = sample();
        cache.concepts.pop();
        let data = serialize(&cache).unwrap();
        let err = deserialize(&data).unwrap_err();
        assert!(err.to_string().contains("dimension"), "{err}");
    }

    #[test]
    fn test_nested_conversion_starts_from_identity() {
        let mut b = TaxonomyBuilder::new(TaxonomyConfig::default());
        b.add_path([("ex:a", "A"), ("ex:a1", "A1")]);
        let t = b.build();
        // Ordering: ex:a1 (leaf), :T, ex:a
        let mut scores = NestedScores::new();
        scores.entry(0).or_default().insert(2, 0.5);
        scores.entry(2).or_default().insert(0, 0.5);

        let cache = deserialize(&serialize_nested(&scores).unwrap())
            .unwrap()
            .into_cache(&t)
            .unwrap();
        assert_eq!(cache.concepts, vec!["ex:a1", ":T", "ex:a"]);
        assert_eq!(cache.matrix.get(1, 1), 1.0);
        assert_eq!(cache.similarity("ex:a1", "ex:a"), Some(0.5));
        assert_eq!(cache.matrix.nnz(), 5);
    }

    #[test]
    fn test_nested_out_of_range_rejected() {
        let mut b = TaxonomyBuilder::new(TaxonomyConfig::default());
        b.add_path([("ex:a", "A")]);
        let t = b.build();
        let mut scores = NestedScores::new();
        scores.entry(0).or_default().insert(9, 0.5);
        let err = CacheFile::Nested(scores).into_cache(&t).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidFormat(_)));
    }
}
