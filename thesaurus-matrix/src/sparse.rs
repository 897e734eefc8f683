//! Square sparse matrix in coordinate (COO) form
//!
//! Entries are kept sorted by `(row, col)` with no duplicates and no stored
//! zeros, so two matrices holding the same scores compare (and serialize)
//! identically.

use crate::error::{MatrixError, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    dim: u32,
    rows: Vec<u32>,
    cols: Vec<u32>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Empty `dim x dim` matrix
    pub fn new(dim: u32) -> Self {
        Self {
            dim,
            ..Default::default()
        }
    }

    /// `dim x dim` identity
    pub fn identity(dim: u32) -> Self {
        Self {
            dim,
            rows: (0..dim).collect(),
            cols: (0..dim).collect(),
            values: vec![1.0; dim as usize],
        }
    }

    /// Build from `(row, col, value)` triplets.
    ///
    /// Zeros are dropped; for a repeated coordinate the last triplet wins.
    pub fn from_triplets(dim: u32, mut triplets: Vec<(u32, u32, f64)>) -> Result<Self> {
        if let Some(&(r, c, _)) = triplets.iter().find(|(r, c, _)| *r >= dim || *c >= dim) {
            return Err(MatrixError::invalid_format(format!(
                "entry ({r}, {c}) outside {dim}x{dim} matrix"
            )));
        }
        triplets.sort_by_key(|&(r, c, _)| (r, c));
        triplets.dedup_by(|next, kept| {
            if (next.0, next.1) == (kept.0, kept.1) {
                kept.2 = next.2;
                true
            } else {
                false
            }
        });

        let mut m = Self::new(dim);
        for (r, c, v) in triplets {
            if v != 0.0 {
                m.rows.push(r);
                m.cols.push(c);
                m.values.push(v);
            }
        }
        Ok(m)
    }

    pub fn dim(&self) -> u32 {
        self.dim
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Stored entries of `row`, as `(col, value)` in column order
    pub fn row(&self, row: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.rows.partition_point(|&r| r < row);
        let end = self.rows.partition_point(|&r| r <= row);
        self.cols[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// Value at `(row, col)`; absent entries are 0
    pub fn get(&self, row: u32, col: u32) -> f64 {
        let start = self.rows.partition_point(|&r| r < row);
        let end = self.rows.partition_point(|&r| r <= row);
        match self.cols[start..end].binary_search(&col) {
            Ok(k) => self.values[start + k],
            Err(_) => 0.0,
        }
    }

    /// All stored entries in `(row, col)` order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .map(|((&r, &c), &v)| (r, c, v))
    }

    pub fn is_symmetric(&self) -> bool {
        self.iter().all(|(r, c, v)| self.get(c, r) == v)
    }

    /// Check the structural invariants of a matrix read from outside.
    pub(crate) fn validate(&self) -> Result<()> {
        let n = self.values.len();
        if self.rows.len() != n || self.cols.len() != n {
            return Err(MatrixError::invalid_format(format!(
                "coordinate length mismatch: {} rows, {} cols, {} values",
                self.rows.len(),
                self.cols.len(),
                n
            )));
        }
        let mut prev: Option<(u32, u32)> = None;
        for (r, c, _) in self.iter() {
            if r >= self.dim || c >= self.dim {
                return Err(MatrixError::invalid_format(format!(
                    "entry ({r}, {c}) outside {0}x{0} matrix",
                    self.dim
                )));
            }
            if prev.is_some_and(|p| p >= (r, c)) {
                return Err(MatrixError::invalid_format(format!(
                    "entries not strictly ordered at ({r}, {c})"
                )));
            }
            prev = Some((r, c));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let m = SparseMatrix::identity(3);
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.get(1, 1), 1.0);
        assert_eq!(m.get(0, 1), 0.0);
        assert!(m.is_symmetric());
        m.validate().unwrap();
    }

    #[test]
    fn test_from_triplets_sorts_and_drops_zeros() {
        let m = SparseMatrix::from_triplets(
            3,
            vec![(2, 0, 0.5), (0, 2, 0.5), (1, 1, 0.0), (0, 0, 1.0)],
        )
        .unwrap();
        assert_eq!(
            m.iter().collect::<Vec<_>>(),
            vec![(0, 0, 1.0), (0, 2, 0.5), (2, 0, 0.5)]
        );
        assert_eq!(m.row(0).collect::<Vec<_>>(), vec![(0, 1.0), (2, 0.5)]);
        assert_eq!(m.row(1).count(), 0);
    }

    #[test]
    fn test_from_triplets_last_wins() {
        let m = SparseMatrix::from_triplets(2, vec![(0, 1, 0.2), (0, 1, 0.7)]).unwrap();
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get(0, 1), 0.7);

        // A later zero removes the entry
        let m = SparseMatrix::from_triplets(2, vec![(1, 1, 1.0), (1, 1, 0.0)]).unwrap();
        assert_eq!(m.nnz(), 0);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = SparseMatrix::from_triplets(2, vec![(0, 2, 1.0)]).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidFormat(_)));
    }

    #[test]
    fn test_validate_rejects_unordered() {
        let m = SparseMatrix {
            dim: 2,
            rows: vec![1, 0],
            cols: vec![0, 1],
            values: vec![0.5, 0.5],
        };
        assert!(m.validate().is_err());

        let m = SparseMatrix {
            dim: 2,
            rows: vec![0],
            cols: vec![],
            values: vec![0.5],
        };
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_asymmetric_detected() {
        let m = SparseMatrix::from_triplets(2, vec![(0, 1, 0.3)]).unwrap();
        assert!(!m.is_symmetric());
    }
}
