use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::{get_json, require_key, MediaProvider, ProviderError};
use crate::models::media::{MediaAsset, MediaKind, MediaSource, ProviderQuery};

const UNSPLASH_BASE_URL: &str = "https://api.unsplash.com/";

#[derive(Debug, Deserialize)]
pub struct PhotoSearchResponse {
    #[serde(default)]
    pub results: Vec<PhotoResult>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoResult {
    pub urls: Option<PhotoUrls>,
    pub user: Option<PhotoUser>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoUrls {
    pub regular: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoUser {
    pub name: Option<String>,
}

/// Photo-only provider.
pub struct UnsplashProvider {
    http: reqwest::Client,
    access_key: Option<String>,
    base_url: String,
}

impl UnsplashProvider {
    pub fn new(http: reqwest::Client, access_key: Option<String>) -> Self {
        Self {
            http,
            access_key,
            base_url: UNSPLASH_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl MediaProvider for UnsplashProvider {
    fn source(&self) -> MediaSource {
        MediaSource::Unsplash
    }

    fn supports(&self, kind: MediaKind) -> bool {
        kind == MediaKind::Photo
    }

    async fn fetch(&self, query: &ProviderQuery) -> Result<Vec<MediaAsset>, ProviderError> {
        if !self.supports(query.kind) {
            return Err(ProviderError::Unsupported(query.kind));
        }
        let access_key = require_key(&self.access_key)?;

        let url = Url::parse(&self.base_url)?.join("search/photos")?;
        let per_page = query.count.to_string();

        let request = self
            .http
            .get(url)
            .header("Authorization", format!("Client-ID {}", access_key))
            .query(&[
                ("query", query.text.as_str()),
                ("per_page", per_page.as_str()),
                ("orientation", "landscape"),
            ]);

        Ok(map_photos(get_json(request).await?))
    }
}

pub fn map_photos(response: PhotoSearchResponse) -> Vec<MediaAsset> {
    response
        .results
        .into_iter()
        .filter_map(|result| {
            let url = result.urls?.regular?;
            let credit = result
                .user
                .and_then(|user| user.name)
                .unwrap_or_else(|| MediaSource::Unsplash.to_string());
            Some(MediaAsset::new(url, credit, MediaSource::Unsplash))
        })
        .collect()
}
