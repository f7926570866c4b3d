use crate::artifact::{read_catalog, read_matrix, ArtifactSource};
use simrec_core::{Dataset, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Loads and validates the catalog and matrix once at start-up
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    catalog: ArtifactSource,
    matrix: ArtifactSource,
}

impl DatasetLoader {
    pub fn new(catalog: ArtifactSource, matrix: ArtifactSource) -> Self {
        Self { catalog, matrix }
    }

    pub fn from_paths<C: AsRef<Path>, M: AsRef<Path>>(catalog: C, matrix: M) -> Self {
        Self::new(ArtifactSource::new(catalog), ArtifactSource::new(matrix))
    }

    #[must_use]
    pub fn with_matrix_sha256(mut self, checksum: impl Into<String>) -> Self {
        self.matrix.sha256 = Some(checksum.into());
        self
    }

    pub fn load(&self) -> Result<Arc<Dataset>> {
        let started = Instant::now();
        let catalog = read_catalog(&self.catalog)?;
        info!(
            path = %self.catalog.path.display(),
            items = catalog.len(),
            "catalog loaded"
        );

        let matrix = read_matrix(&self.matrix)?;
        info!(
            path = %self.matrix.path.display(),
            dim = matrix.dim(),
            verified = self.matrix.sha256.is_some(),
            "similarity matrix loaded"
        );

        let dataset = Dataset::new(catalog, matrix)?;
        info!(
            items = dataset.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dataset ready"
        );
        Ok(Arc::new(dataset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{write_catalog, write_matrix};
    use simrec_core::{Catalog, Error, Item, SimilarityMatrix};

    fn write_fixture(dir: &Path, items: usize, dim: usize) -> (std::path::PathBuf, std::path::PathBuf, String) {
        let catalog = Catalog::new(
            (0..items)
                .map(|i| Item::new(i as u64 + 1, format!("Movie {}", i)))
                .collect(),
        );
        let matrix = SimilarityMatrix::from_flat(dim, vec![0.5; dim * dim]).unwrap();

        let catalog_path = dir.join("movies.json");
        let matrix_path = dir.join("similarity.bin");
        write_catalog(&catalog_path, &catalog).unwrap();
        let checksum = write_matrix(&matrix_path, &matrix).unwrap();
        (catalog_path, matrix_path, checksum)
    }

    #[test]
    fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog_path, matrix_path, checksum) = write_fixture(dir.path(), 3, 3);

        let dataset = DatasetLoader::from_paths(&catalog_path, &matrix_path)
            .with_matrix_sha256(checksum)
            .load()
            .unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.catalog().index_of_title("Movie 2").unwrap(), 2);
    }

    #[test]
    fn test_dimension_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog_path, matrix_path, _) = write_fixture(dir.path(), 4, 3);

        let result = DatasetLoader::from_paths(&catalog_path, &matrix_path).load();
        assert!(matches!(
            result,
            Err(Error::InvalidShape { expected: 4, actual: 3 })
        ));
    }
}
