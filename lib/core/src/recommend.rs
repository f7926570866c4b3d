//! Title in, ranked recommendations with images out

use crate::dataset::Dataset;
use crate::item::ItemId;
use crate::provider::MetadataProvider;
use crate::Result;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of recommendations returned when the caller does not ask for a count
pub const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub id: ItemId,
    pub title: String,
    pub score: f64,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    pub default_limit: usize,
    /// Requested limits above this are clamped
    pub max_limit: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: 100,
        }
    }
}

/// Composes catalog lookup, ranking and metadata enrichment
pub struct Recommender<P> {
    dataset: Arc<Dataset>,
    provider: P,
    config: RecommenderConfig,
}

impl<P: MetadataProvider> Recommender<P> {
    pub fn new(dataset: Arc<Dataset>, provider: P) -> Self {
        Self::with_config(dataset, provider, RecommenderConfig::default())
    }

    pub fn with_config(dataset: Arc<Dataset>, provider: P, config: RecommenderConfig) -> Self {
        Self {
            dataset,
            provider,
            config,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Recommend `k` items similar to `title`.
    ///
    /// Fails only on an unknown title. Metadata lookups that fail leave the
    /// corresponding `image_url` empty.
    pub async fn recommend(&self, title: &str, k: usize) -> Result<Vec<Recommendation>> {
        let k = k.min(self.config.max_limit);
        let catalog = self.dataset.catalog();
        let query = catalog.index_of_title(title)?;
        let neighbors = self.dataset.ranker().top_k(query, k)?;

        let mut picked = Vec::with_capacity(neighbors.len());
        for neighbor in &neighbors {
            picked.push((catalog.item_at(neighbor.index)?, neighbor.score));
        }

        let lookups = picked
            .iter()
            .map(|(item, _)| self.provider.image_url(item.id));
        let images = join_all(lookups).await;

        let results = picked
            .into_iter()
            .zip(images)
            .map(|((item, score), image)| {
                let image_url = image.unwrap_or_else(|e| {
                    tracing::warn!(id = item.id, title = %item.title, error = %e, "metadata lookup failed");
                    None
                });
                Recommendation {
                    id: item.id,
                    title: item.title.clone(),
                    score,
                    image_url,
                }
            })
            .collect();

        Ok(results)
    }

    /// Recommend using the configured default count
    pub async fn recommend_default(&self, title: &str) -> Result<Vec<Recommendation>> {
        self.recommend(title, self.config.default_limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MetadataError, NoMetadata, StaticMetadata};
    use crate::{Catalog, Error, Item, SimilarityMatrix};

    struct FailingFor(ItemId);

    impl MetadataProvider for FailingFor {
        async fn image_url(&self, id: ItemId) -> std::result::Result<Option<String>, MetadataError> {
            if id == self.0 {
                Err(MetadataError::Status(503))
            } else {
                Ok(Some(format!("https://img/{}.jpg", id)))
            }
        }
    }

    fn dataset() -> Arc<Dataset> {
        let catalog = Catalog::new(vec![
            Item::new(1, "A"),
            Item::new(2, "B"),
            Item::new(3, "C"),
            Item::new(4, "D"),
        ]);
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.9, 0.9, 0.1],
            vec![0.9, 1.0, 0.3, 0.2],
            vec![0.9, 0.3, 1.0, 0.7],
            vec![0.1, 0.2, 0.7, 1.0],
        ])
        .unwrap();
        Arc::new(Dataset::new(catalog, matrix).unwrap())
    }

    #[tokio::test]
    async fn test_recommend_titles_in_rank_order() {
        let recommender = Recommender::new(dataset(), NoMetadata);
        let results = recommender.recommend("A", 2).await.unwrap();

        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C"]);
        assert_eq!(results[0].id, 2);
        assert!((results[0].score - 0.9).abs() < 1e-6);
        assert!(results.iter().all(|r| r.image_url.is_none()));
    }

    #[tokio::test]
    async fn test_recommend_default_returns_all_when_small() {
        let recommender = Recommender::new(dataset(), NoMetadata);
        let results = recommender.recommend_default("D").await.unwrap();
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "B", "A"]);
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_entry() {
        let recommender = Recommender::new(dataset(), FailingFor(3));
        let results = recommender.recommend("A", 3).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].image_url.as_deref(), Some("https://img/2.jpg"));
        assert_eq!(results[1].title, "C");
        assert_eq!(results[1].image_url, None);
        assert_eq!(results[2].image_url.as_deref(), Some("https://img/4.jpg"));
    }

    #[tokio::test]
    async fn test_static_images_attached() {
        let provider = StaticMetadata::new().with_image(4, "https://img/d.jpg");
        let recommender = Recommender::new(dataset(), provider);
        let results = recommender.recommend("C", 1).await.unwrap();
        assert_eq!(results[0].title, "A");
        assert_eq!(results[0].image_url, None);

        let results = recommender.recommend("C", 3).await.unwrap();
        assert_eq!(results[1].title, "D");
        assert_eq!(results[1].image_url.as_deref(), Some("https://img/d.jpg"));
    }

    #[tokio::test]
    async fn test_unknown_title() {
        let recommender = Recommender::new(dataset(), NoMetadata);
        let err = recommender.recommend("Z", 5).await.unwrap_err();
        assert!(matches!(err, Error::TitleNotFound(_)));
    }

    #[tokio::test]
    async fn test_limit_clamped() {
        let config = RecommenderConfig {
            default_limit: 5,
            max_limit: 1,
        };
        let recommender = Recommender::with_config(dataset(), NoMetadata, config);
        assert_eq!(recommender.recommend("A", 3).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_limit() {
        let recommender = Recommender::new(dataset(), NoMetadata);
        assert!(recommender.recommend("A", 0).await.unwrap().is_empty());
    }
}
