// Catalog and similarity matrix artifacts
use crate::format::ArtifactFormat;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use simrec_core::{Catalog, Error, Item, Result, SimilarityMatrix};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Bincode layout of a matrix artifact: row-major scores
#[derive(Debug, Serialize, Deserialize)]
pub struct MatrixRecord {
    pub dim: usize,
    pub scores: Vec<f64>,
}

/// Location of an artifact plus the checksum it must match, if known
#[derive(Debug, Clone)]
pub struct ArtifactSource {
    pub path: PathBuf,
    pub sha256: Option<String>,
}

impl ArtifactSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sha256: None,
        }
    }

    #[must_use]
    pub fn with_sha256(mut self, checksum: impl Into<String>) -> Self {
        self.sha256 = Some(checksum.into());
        self
    }

    pub fn format(&self) -> Result<ArtifactFormat> {
        ArtifactFormat::from_path(&self.path)
    }

    /// Read the raw bytes, verifying the checksum when one is set
    pub fn read_verified(&self) -> Result<Vec<u8>> {
        let data = fs::read(&self.path)?;
        if let Some(expected) = &self.sha256 {
            let actual = sha256_hex(&data);
            if !actual.eq_ignore_ascii_case(expected.trim()) {
                return Err(Error::ChecksumMismatch {
                    path: self.path.display().to_string(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }
        Ok(data)
    }
}

pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

pub fn sha256_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let data = fs::read(path)?;
    Ok(sha256_hex(&data))
}

fn decode_json<T: DeserializeOwned>(data: &[u8], format: ArtifactFormat) -> Result<T> {
    let parsed = match format {
        ArtifactFormat::Json => serde_json::from_slice(data),
        ArtifactFormat::JsonGz => {
            let mut decoder = GzDecoder::new(data);
            let mut json_data = Vec::new();
            decoder.read_to_end(&mut json_data)?;
            serde_json::from_slice(&json_data)
        }
        ArtifactFormat::Bincode => {
            return Err(Error::InvalidConfig(
                "bincode is not a JSON encoding".to_string(),
            ))
        }
    };
    parsed.map_err(|e| Error::Serialization(e.to_string()))
}

fn encode_json<T: Serialize>(value: &T, format: ArtifactFormat) -> Result<Vec<u8>> {
    let json_data = serde_json::to_vec(value).map_err(|e| Error::Serialization(e.to_string()))?;
    match format {
        ArtifactFormat::Json => Ok(json_data),
        ArtifactFormat::JsonGz => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&json_data)?;
            Ok(encoder.finish()?)
        }
        ArtifactFormat::Bincode => Err(Error::InvalidConfig(
            "bincode is not a JSON encoding".to_string(),
        )),
    }
}

/// Write to a temporary sibling, then rename into place
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let temp_file = path.with_extension("tmp");
    fs::write(&temp_file, data)?;
    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Load a catalog from a JSON array of item records
pub fn read_catalog(source: &ArtifactSource) -> Result<Catalog> {
    let format = source.format()?;
    if format == ArtifactFormat::Bincode {
        return Err(Error::InvalidConfig(format!(
            "catalog must be JSON or gzip JSON: {}",
            source.path.display()
        )));
    }
    let data = source.read_verified()?;
    let items: Vec<Item> = decode_json(&data, format)?;
    Ok(Catalog::new(items))
}

pub fn read_matrix(source: &ArtifactSource) -> Result<SimilarityMatrix> {
    let format = source.format()?;
    let data = source.read_verified()?;
    match format {
        ArtifactFormat::Bincode => {
            let record: MatrixRecord = bincode::deserialize(&data)
                .map_err(|e| Error::Serialization(e.to_string()))?;
            SimilarityMatrix::from_flat(record.dim, record.scores)
        }
        _ => {
            let rows: Vec<Vec<f64>> = decode_json(&data, format)?;
            SimilarityMatrix::from_rows(rows)
        }
    }
}

/// Write a catalog and return the SHA-256 of the written file
pub fn write_catalog<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<String> {
    let path = path.as_ref();
    let format = ArtifactFormat::from_path(path)?;
    let data = encode_json(&catalog.items(), format)?;
    write_atomic(path, &data)?;
    Ok(sha256_hex(&data))
}

/// Write a matrix and return the SHA-256 of the written file
pub fn write_matrix<P: AsRef<Path>>(path: P, matrix: &SimilarityMatrix) -> Result<String> {
    let path = path.as_ref();
    let data = match ArtifactFormat::from_path(path)? {
        ArtifactFormat::Bincode => {
            let record = MatrixRecord {
                dim: matrix.dim(),
                scores: matrix.as_flat().to_vec(),
            };
            bincode::serialize(&record).map_err(|e| Error::Serialization(e.to_string()))?
        }
        format => {
            let rows: Vec<&[f64]> = matrix.rows().collect();
            encode_json(&rows, format)?
        }
    };
    write_atomic(path, &data)?;
    Ok(sha256_hex(&data))
}
