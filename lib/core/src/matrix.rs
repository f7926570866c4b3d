use crate::{Error, Result};

/// Dense square similarity matrix, stored row-major.
///
/// Row `i` holds the scores of item `i` against every item, itself included.
/// The matrix is taken as given: symmetry is not checked, NaN is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build from a row-major buffer of `dim * dim` scores
    pub fn from_flat(dim: usize, scores: Vec<f64>) -> Result<Self> {
        let expected = dim.checked_mul(dim).ok_or_else(|| {
            Error::InvalidConfig(format!("matrix dimension {} overflows", dim))
        })?;
        if scores.len() != expected {
            return Err(Error::InvalidShape {
                expected,
                actual: scores.len(),
            });
        }
        if let Some(pos) = scores.iter().position(|s| s.is_nan()) {
            return Err(Error::InvalidScore {
                row: pos / dim,
                col: pos % dim,
            });
        }
        Ok(Self { dim, scores })
    }

    /// Build from nested rows; every row must be as long as there are rows
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dim = rows.len();
        let mut scores = Vec::with_capacity(dim * dim);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dim {
                return Err(Error::RaggedRow {
                    row,
                    expected: dim,
                    actual: values.len(),
                });
            }
            scores.extend(values);
        }

        Self::from_flat(dim, scores)
    }

    /// Number of rows (and columns)
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    pub fn row(&self, index: usize) -> Result<&[f64]> {
        if index >= self.dim {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.dim,
            });
        }
        let start = index * self.dim;
        Ok(&self.scores[start..start + self.dim])
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.dim && col < self.dim {
            Some(self.scores[row * self.dim + col])
        } else {
            None
        }
    }

    #[inline]
    pub fn as_flat(&self) -> &[f64] {
        &self.scores
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size
        self.scores.chunks_exact(self.dim.max(1))
    }

    pub fn into_flat(self) -> (usize, Vec<f64>) {
        (self.dim, self.scores)
    }
}
