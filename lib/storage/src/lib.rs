pub mod artifact;
pub mod format;
pub mod loader;

pub use artifact::{
    read_catalog, read_matrix, sha256_file, sha256_hex, write_catalog, write_matrix,
    ArtifactSource, MatrixRecord,
};
pub use format::ArtifactFormat;
pub use loader::DatasetLoader;
