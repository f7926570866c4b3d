//! Top-k ranking over a precomputed similarity row

use crate::matrix::SimilarityMatrix;
use crate::Result;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A ranked candidate: its catalog position and its score against the query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub index: usize,
    pub score: f64,
}

/// Score descending, then index ascending.
///
/// Indices are distinct within a row, so this is a total order and the
/// ranking never depends on the stability of the sort routine.
#[inline]
fn rank_order(a: &Neighbor, b: &Neighbor) -> Ordering {
    OrderedFloat(b.score)
        .cmp(&OrderedFloat(a.score))
        .then_with(|| a.index.cmp(&b.index))
}

/// Stateless ranker borrowing a similarity matrix
#[derive(Debug, Clone, Copy)]
pub struct Ranker<'a> {
    matrix: &'a SimilarityMatrix,
}

impl<'a> Ranker<'a> {
    #[inline]
    #[must_use]
    pub fn new(matrix: &'a SimilarityMatrix) -> Self {
        Self { matrix }
    }

    /// The `k` items most similar to `query`, best first, `query` excluded.
    ///
    /// Returns fewer than `k` neighbors when the catalog is too small.
    pub fn top_k(&self, query: usize, k: usize) -> Result<Vec<Neighbor>> {
        let row = self.matrix.row(query)?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut candidates: Vec<Neighbor> = row
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != query)
            .map(|(index, &score)| Neighbor { index, score })
            .collect();

        if k < candidates.len() {
            candidates.select_nth_unstable_by(k, rank_order);
            candidates.truncate(k);
        }
        candidates.sort_unstable_by(rank_order);

        tracing::debug!(query, k, returned = candidates.len(), "ranked neighbors");
        Ok(candidates)
    }

    /// Full ranking of every other item against `query`
    pub fn rank_all(&self, query: usize) -> Result<Vec<Neighbor>> {
        self.top_k(query, self.matrix.dim())
    }
}
