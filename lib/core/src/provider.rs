//! Display metadata lookup
//!
//! Providers are best-effort: the recommender treats any error as a missing
//! image and never lets it fail a ranking.

use crate::item::ItemId;
use std::collections::HashMap;
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("decode error: {0}")]
    Decode(String),
}

/// Source of display images for catalog items
pub trait MetadataProvider {
    /// Image URL for `id`, or `None` when the provider has none
    fn image_url(
        &self,
        id: ItemId,
    ) -> impl Future<Output = Result<Option<String>, MetadataError>> + Send;
}

/// Provider that never has an image
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl MetadataProvider for NoMetadata {
    async fn image_url(&self, _id: ItemId) -> Result<Option<String>, MetadataError> {
        Ok(None)
    }
}

/// In-memory id -> image URL table
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    images: HashMap<ItemId, String>,
}

impl StaticMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_image(mut self, id: ItemId, url: impl Into<String>) -> Self {
        self.images.insert(id, url.into());
        self
    }

    pub fn insert(&mut self, id: ItemId, url: impl Into<String>) {
        self.images.insert(id, url.into());
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl FromIterator<(ItemId, String)> for StaticMetadata {
    fn from_iter<I: IntoIterator<Item = (ItemId, String)>>(iter: I) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}

impl MetadataProvider for StaticMetadata {
    async fn image_url(&self, id: ItemId) -> Result<Option<String>, MetadataError> {
        Ok(self.images.get(&id).cloned())
    }
}
