//! Stock-media lookup for trip enrichment.
//!
//! Each provider wraps one search API and fails soft: a missing key, a timeout,
//! an error status or an unreadable body all come back as an empty result. The
//! [`MediaCascade`] asks providers in a fixed priority order and stops at the
//! first one that returns anything. `resolve_*` finish with a random pick from
//! a static table, so callers always receive at least one asset.

pub mod fallback;
pub mod pexels;
pub mod pixabay;
pub mod rendition;
pub mod unsplash;

#[cfg(test)]
mod stub_server;

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::MediaConfig;
use crate::models::media::{MediaAsset, MediaKind, MediaSource, ProviderQuery};

pub use pexels::PexelsProvider;
pub use pixabay::PixabayProvider;
pub use unsplash::UnsplashProvider;

pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MEDIA_COUNT: u32 = 3;

#[derive(Debug)]
pub enum ProviderError {
    MissingCredential,
    Unsupported(MediaKind),
    InvalidUrl(url::ParseError),
    Transport(reqwest::Error),
    Status(reqwest::StatusCode),
    Malformed(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::MissingCredential => write!(f, "Provider credential not configured"),
            ProviderError::Unsupported(kind) => write!(f, "Unsupported media kind: {:?}", kind),
            ProviderError::InvalidUrl(err) => write!(f, "Invalid endpoint URL: {}", err),
            ProviderError::Transport(err) => write!(f, "HTTP error: {}", err),
            ProviderError::Status(status) => write!(f, "Unexpected status: {}", status),
            ProviderError::Malformed(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err)
    }
}

impl From<url::ParseError> for ProviderError {
    fn from(err: url::ParseError) -> Self {
        ProviderError::InvalidUrl(err)
    }
}

#[async_trait]
pub trait MediaProvider: Send + Sync {
    fn source(&self) -> MediaSource;

    fn supports(&self, kind: MediaKind) -> bool;

    async fn fetch(&self, query: &ProviderQuery) -> Result<Vec<MediaAsset>, ProviderError>;

    /// Like [`MediaProvider::fetch`] but never fails: errors are logged and
    /// reported as "no results".
    async fn search(&self, query: &ProviderQuery) -> Vec<MediaAsset> {
        if !self.supports(query.kind) {
            return Vec::new();
        }

        match self.fetch(query).await {
            Ok(assets) => assets,
            Err(ProviderError::MissingCredential) => {
                debug!("{} not configured, skipping '{}'", self.source(), query.text);
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "Error fetching from {} for '{}': {}",
                    self.source(),
                    query.text,
                    err
                );
                Vec::new()
            }
        }
    }
}

/// Sends a provider request and decodes its JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request.timeout(PROVIDER_TIMEOUT).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::Malformed(e.to_string()))
}

pub(crate) fn require_key(key: &Option<String>) -> Result<&str, ProviderError> {
    key.as_deref().ok_or(ProviderError::MissingCredential)
}

/// Ordered provider chains for photos and videos.
#[derive(Clone)]
pub struct MediaCascade {
    image_chain: Vec<Arc<dyn MediaProvider>>,
    video_chain: Vec<Arc<dyn MediaProvider>>,
}

impl MediaCascade {
    pub fn new(
        image_chain: Vec<Arc<dyn MediaProvider>>,
        video_chain: Vec<Arc<dyn MediaProvider>>,
    ) -> Self {
        Self {
            image_chain,
            video_chain,
        }
    }

    /// Images: Pexels, Unsplash, Pixabay. Videos: Pexels, Pixabay.
    pub fn from_config(config: &MediaConfig) -> Self {
        let http = reqwest::Client::new();

        let pexels: Arc<dyn MediaProvider> = Arc::new(PexelsProvider::new(
            http.clone(),
            config.pexels_api_key.clone(),
        ));
        let unsplash: Arc<dyn MediaProvider> = Arc::new(UnsplashProvider::new(
            http.clone(),
            config.unsplash_access_key.clone(),
        ));
        let pixabay: Arc<dyn MediaProvider> =
            Arc::new(PixabayProvider::new(http, config.pixabay_api_key.clone()));

        Self::new(
            vec![pexels.clone(), unsplash, pixabay.clone()],
            vec![pexels, pixabay],
        )
    }

    /// Provider results only; empty when every provider came back empty.
    pub async fn search_images(&self, query: &str, count: u32) -> Vec<MediaAsset> {
        run_chain(&self.image_chain, ProviderQuery::photos(query, count)).await
    }

    pub async fn search_videos(&self, query: &str, count: u32) -> Vec<MediaAsset> {
        run_chain(&self.video_chain, ProviderQuery::videos(query, count)).await
    }

    pub async fn resolve_images(&self, query: &str, count: u32) -> Vec<MediaAsset> {
        let images = self.search_images(query, count).await;
        if !images.is_empty() {
            return images;
        }

        debug!("No provider images for '{}', using static fallback", query);
        vec![fallback::random_static_image()]
    }

    pub async fn resolve_videos(&self, query: &str, count: u32) -> Vec<MediaAsset> {
        let videos = self.search_videos(query, count).await;
        if !videos.is_empty() {
            return videos;
        }

        debug!("No provider videos for '{}', using static fallback", query);
        vec![fallback::random_static_video()]
    }
}

async fn run_chain(chain: &[Arc<dyn MediaProvider>], query: ProviderQuery) -> Vec<MediaAsset> {
    for provider in chain {
        if !provider.supports(query.kind) {
            continue;
        }

        let assets = provider.search(&query).await;
        if !assets.is_empty() {
            debug!(
                "{} returned {} result(s) for '{}'",
                provider.source(),
                assets.len(),
                query.text
            );
            return assets;
        }
    }

    Vec::new()
}

/// Attribution shown next to the hero image.
pub fn credit_line(asset: &MediaAsset) -> String {
    format!("Photo by {} on {}", asset.credit, asset.source)
}
