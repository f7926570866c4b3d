//! TMDB poster lookup
//!
//! Resolves an item id to a poster URL through the TMDB v3 movie details
//! endpoint. Requests authenticate with a v4 read-access bearer token.

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use simrec_core::{ItemId, MetadataError, MetadataProvider};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_base: String,
    /// Prefix joined with `poster_path` to form the image URL
    pub image_base: String,
    pub language: String,
    pub timeout: Duration,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            language: "en-US".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieDetails {
    #[serde(default)]
    poster_path: Option<String>,
}

pub struct TmdbProvider {
    client: reqwest::Client,
    token: String,
    config: TmdbConfig,
}

impl TmdbProvider {
    pub fn new(token: impl Into<String>, config: TmdbConfig) -> Result<Self, MetadataError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MetadataError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            token: token.into(),
            config,
        })
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    fn movie_url(&self, id: ItemId) -> String {
        format!("{}/movie/{}", self.config.api_base.trim_end_matches('/'), id)
    }

    fn poster_url(&self, details: &MovieDetails) -> Option<String> {
        details
            .poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", self.config.image_base.trim_end_matches('/'), p))
    }
}

impl MetadataProvider for TmdbProvider {
    async fn image_url(&self, id: ItemId) -> Result<Option<String>, MetadataError> {
        let response = self
            .client
            .get(self.movie_url(id))
            .query(&[("language", self.config.language.as_str())])
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| MetadataError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(MetadataError::Status(status.as_u16()));
        }

        let details: MovieDetails = response
            .json()
            .await
            .map_err(|e| MetadataError::Decode(e.to_string()))?;
        Ok(self.poster_url(&details))
    }
}
