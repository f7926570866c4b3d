//! # simrec Core
//!
//! Core library for the simrec recommender.
//!
//! This crate provides the in-memory data structures and the ranking:
//!
//! - [`Catalog`] - Ordered items with title lookup
//! - [`SimilarityMatrix`] - Precomputed N×N score table
//! - [`Dataset`] - Validated catalog + matrix pair, shared read-only
//! - [`Ranker`] - Deterministic top-k over a matrix row
//! - [`Recommender`] - Title to ranked items with display images
//!
//! ## Example
//!
//! ```rust
//! use simrec_core::{Catalog, Dataset, Item, SimilarityMatrix};
//!
//! let catalog = Catalog::new(vec![
//!     Item::new(1, "A"),
//!     Item::new(2, "B"),
//!     Item::new(3, "C"),
//!     Item::new(4, "D"),
//! ]);
//! let matrix = SimilarityMatrix::from_rows(vec![
//!     vec![1.0, 0.9, 0.9, 0.1],
//!     vec![0.9, 1.0, 0.3, 0.2],
//!     vec![0.9, 0.3, 1.0, 0.7],
//!     vec![0.1, 0.2, 0.7, 1.0],
//! ]).unwrap();
//! let dataset = Dataset::new(catalog, matrix).unwrap();
//!
//! let query = dataset.catalog().index_of_title("A").unwrap();
//! let top = dataset.ranker().top_k(query, 2).unwrap();
//! assert_eq!(top[0].index, 1);
//! assert_eq!(top[1].index, 2);
//! ```

pub mod catalog;
pub mod dataset;
pub mod error;
pub mod item;
pub mod matrix;
pub mod provider;
pub mod ranker;
pub mod recommend;

pub use catalog::Catalog;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use item::{Item, ItemId};
pub use matrix::SimilarityMatrix;
pub use provider::{MetadataError, MetadataProvider, NoMetadata, StaticMetadata};
pub use ranker::{Neighbor, Ranker};
pub use recommend::{Recommendation, Recommender, RecommenderConfig, DEFAULT_LIMIT};
