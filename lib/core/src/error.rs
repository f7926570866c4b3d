use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Title not found: {0}")]
    TitleNotFound(String),

    #[error("Index out of range: {index} (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid shape: expected {expected}, got {actual}")]
    InvalidShape { expected: usize, actual: usize },

    #[error("Ragged matrix row {row}: expected {expected} columns, got {actual}")]
    RaggedRow { row: usize, expected: usize, actual: usize },

    #[error("Invalid similarity score at ({row}, {col})")]
    InvalidScore { row: usize, col: usize },

    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Unknown titles are a caller mistake, not a broken dataset.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::TitleNotFound(_))
    }
}
