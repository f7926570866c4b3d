use crate::catalog::Catalog;
use crate::matrix::SimilarityMatrix;
use crate::ranker::Ranker;
use crate::{Error, Result};

/// A catalog paired with its similarity matrix.
///
/// Built once at start-up and shared read-only (usually behind an `Arc`).
/// Construction guarantees one matrix row per catalog item.
#[derive(Debug, Clone)]
pub struct Dataset {
    catalog: Catalog,
    matrix: SimilarityMatrix,
}

impl Dataset {
    pub fn new(catalog: Catalog, matrix: SimilarityMatrix) -> Result<Self> {
        if matrix.dim() != catalog.len() {
            return Err(Error::InvalidShape {
                expected: catalog.len(),
                actual: matrix.dim(),
            });
        }
        Ok(Self { catalog, matrix })
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    #[inline]
    pub fn ranker(&self) -> Ranker<'_> {
        Ranker::new(&self.matrix)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Item;

    #[test]
    fn test_shape_mismatch_fails_fast() {
        let catalog = Catalog::new(vec![Item::new(1, "A"), Item::new(2, "B")]);
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        let result = Dataset::new(catalog, matrix);
        assert!(matches!(
            result,
            Err(Error::InvalidShape { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_ranker_over_dataset() {
        let catalog = Catalog::new(vec![Item::new(1, "A"), Item::new(2, "B")]);
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.4], vec![0.4, 1.0]]).unwrap();
        let dataset = Dataset::new(catalog, matrix).unwrap();

        let query = dataset.catalog().index_of_title("B").unwrap();
        let top = dataset.ranker().top_k(query, 5).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(dataset.catalog().item_at(top[0].index).unwrap().title, "A");
    }
}
