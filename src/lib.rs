//! # simrec
//!
//! Item-to-item recommendations over a precomputed similarity matrix.
//!
//! Given a selected item, simrec reads that item's row of an externally
//! computed N×N similarity matrix, ranks every other item by score (ties by
//! catalog position) and returns the top matches, optionally enriched with
//! poster images from TMDB.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! simrec serve --catalog movies.json --matrix similarity.bin --tmdb-token $TOKEN
//! curl -X POST localhost:8080/recommend -H 'content-type: application/json' \
//!      -d '{"title": "Avatar"}'
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use simrec::prelude::*;
//!
//! # async fn run() -> simrec::Result<()> {
//! let dataset = DatasetLoader::from_paths("movies.json", "similarity.bin").load()?;
//! let recommender = Recommender::new(dataset, NoMetadata);
//!
//! for rec in recommender.recommend("Avatar", 5).await? {
//!     println!("{} ({:.3})", rec.title, rec.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - `simrec-core` - Catalog, similarity matrix, ranker, recommender
//! - `simrec-storage` - Artifact loading (JSON, gzip JSON, bincode) and checksums
//! - `simrec-api` - REST API and the TMDB poster provider

// Re-export core types
pub use simrec_core::{
    Catalog, Dataset, Item, ItemId, SimilarityMatrix,
    Neighbor, Ranker,
    Recommendation, Recommender, RecommenderConfig,
    MetadataError, MetadataProvider, NoMetadata, StaticMetadata,
    Error, Result,
};

// Re-export storage
pub use simrec_storage::{ArtifactFormat, ArtifactSource, DatasetLoader};

// Re-export API
pub use simrec_api::{RestApi, TmdbConfig, TmdbProvider};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, Dataset, Item, ItemId, SimilarityMatrix,
        Neighbor, Ranker,
        Recommendation, Recommender, RecommenderConfig,
        MetadataProvider, NoMetadata, StaticMetadata,
        Error, Result,
        ArtifactSource, DatasetLoader,
        RestApi, TmdbConfig, TmdbProvider,
    };
}

/// Artifact readers and writers
pub mod storage {
    pub use simrec_storage::{read_catalog, read_matrix, sha256_file, write_catalog, write_matrix};
}
