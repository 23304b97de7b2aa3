use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::{get_json, require_key, MediaProvider, ProviderError};
use crate::models::media::{MediaAsset, MediaKind, MediaSource, ProviderQuery};

const PIXABAY_BASE_URL: &str = "https://pixabay.com/api/";
// Pixabay rejects per_page values outside this range.
const PIXABAY_MIN_PER_PAGE: u32 = 3;
const PIXABAY_MAX_PER_PAGE: u32 = 200;

#[derive(Debug, Deserialize)]
pub struct PhotoSearchResponse {
    #[serde(default)]
    pub hits: Vec<PhotoHit>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoHit {
    #[serde(rename = "webformatURL")]
    pub webformat_url: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSearchResponse {
    #[serde(default)]
    pub hits: Vec<VideoHit>,
}

#[derive(Debug, Deserialize)]
pub struct VideoHit {
    pub videos: Option<VideoSizes>,
    pub user: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSizes {
    pub large: Option<VideoFile>,
    pub medium: Option<VideoFile>,
}

#[derive(Debug, Deserialize)]
pub struct VideoFile {
    pub url: Option<String>,
}

pub struct PixabayProvider {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl PixabayProvider {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: PIXABAY_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl MediaProvider for PixabayProvider {
    fn source(&self) -> MediaSource {
        MediaSource::Pixabay
    }

    fn supports(&self, _kind: MediaKind) -> bool {
        true
    }

    async fn fetch(&self, query: &ProviderQuery) -> Result<Vec<MediaAsset>, ProviderError> {
        let api_key = require_key(&self.api_key)?;
        let base_url = Url::parse(&self.base_url)?;
        let per_page = query.count.clamp(PIXABAY_MIN_PER_PAGE, PIXABAY_MAX_PER_PAGE).to_string();

        match query.kind {
            MediaKind::Photo => {
                let request = self.http.get(base_url).query(&[
                    ("key", api_key),
                    ("q", query.text.as_str()),
                    ("image_type", "photo"),
                    ("orientation", "horizontal"),
                    ("per_page", per_page.as_str()),
                    ("safesearch", "true"),
                ]);
                Ok(map_photos(get_json(request).await?))
            }
            MediaKind::Video => {
                let request = self.http.get(base_url.join("videos/")?).query(&[
                    ("key", api_key),
                    ("q", query.text.as_str()),
                    ("per_page", per_page.as_str()),
                    ("safesearch", "true"),
                ]);
                Ok(map_videos(get_json(request).await?))
            }
        }
    }
}

pub fn map_photos(response: PhotoSearchResponse) -> Vec<MediaAsset> {
    response
        .hits
        .into_iter()
        .filter_map(|hit| {
            let url = hit.webformat_url?;
            let credit = hit
                .user
                .unwrap_or_else(|| MediaSource::Pixabay.to_string());
            Some(MediaAsset::new(url, credit, MediaSource::Pixabay))
        })
        .collect()
}

/// Medium files stream better than large ones, so they win when both exist.
pub fn map_videos(response: VideoSearchResponse) -> Vec<MediaAsset> {
    response
        .hits
        .into_iter()
        .filter_map(|hit| {
            let sizes = hit.videos?;
            let url = sizes
                .medium
                .and_then(|file| file.url)
                .filter(|url| !url.is_empty())
                .or_else(|| sizes.large.and_then(|file| file.url))
                .filter(|url| !url.is_empty())?;
            let credit = hit
                .user
                .unwrap_or_else(|| MediaSource::Pixabay.to_string());
            Some(MediaAsset::new(url, credit, MediaSource::Pixabay))
        })
        .collect()
}
