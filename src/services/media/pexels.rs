use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::rendition::select_rendition;
use super::{get_json, require_key, MediaProvider, ProviderError};
use crate::models::media::{MediaAsset, MediaKind, MediaSource, ProviderQuery, VideoRendition};

const PEXELS_BASE_URL: &str = "https://api.pexels.com/v1/";

#[derive(Debug, Deserialize)]
pub struct PhotoSearchResponse {
    #[serde(default)]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
pub struct Photo {
    pub src: Option<PhotoSrc>,
    pub photographer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoSrc {
    pub large2x: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSearchResponse {
    #[serde(default)]
    pub videos: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub video_files: Vec<VideoFile>,
    pub user: Option<VideoUser>,
}

#[derive(Debug, Deserialize)]
pub struct VideoFile {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VideoUser {
    pub name: Option<String>,
}

pub struct PexelsProvider {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl PexelsProvider {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: PEXELS_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl MediaProvider for PexelsProvider {
    fn source(&self) -> MediaSource {
        MediaSource::Pexels
    }

    fn supports(&self, _kind: MediaKind) -> bool {
        true
    }

    async fn fetch(&self, query: &ProviderQuery) -> Result<Vec<MediaAsset>, ProviderError> {
        let api_key = require_key(&self.api_key)?;

        let endpoint = match query.kind {
            MediaKind::Photo => "search",
            MediaKind::Video => "videos/search",
        };
        let url = Url::parse(&self.base_url)?.join(endpoint)?;
        let per_page = query.count.to_string();

        let request = self
            .http
            .get(url)
            .header("Authorization", api_key)
            .query(&[
                ("query", query.text.as_str()),
                ("per_page", per_page.as_str()),
                ("orientation", "landscape"),
            ]);

        match query.kind {
            MediaKind::Photo => Ok(map_photos(get_json(request).await?)),
            MediaKind::Video => Ok(map_videos(get_json(request).await?)),
        }
    }
}

pub fn map_photos(response: PhotoSearchResponse) -> Vec<MediaAsset> {
    response
        .photos
        .into_iter()
        .filter_map(|photo| {
            let url = photo.src?.large2x?;
            let credit = photo
                .photographer
                .unwrap_or_else(|| MediaSource::Pexels.to_string());
            Some(MediaAsset::new(url, credit, MediaSource::Pexels))
        })
        .collect()
}

/// Keeps one rendition per video; videos without a usable file are dropped.
pub fn map_videos(response: VideoSearchResponse) -> Vec<MediaAsset> {
    response
        .videos
        .into_iter()
        .filter_map(|video| {
            let renditions: Vec<VideoRendition> = video
                .video_files
                .into_iter()
                .filter_map(|file| {
                    Some(VideoRendition {
                        width: file.width.unwrap_or(0),
                        height: file.height.unwrap_or(0),
                        link: file.link?,
                    })
                })
                .collect();

            let selected = select_rendition(&renditions)?;
            let credit = video
                .user
                .and_then(|user| user.name)
                .unwrap_or_else(|| MediaSource::Pexels.to_string());
            Some(MediaAsset::new(
                selected.link.clone(),
                credit,
                MediaSource::Pexels,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::media::stub_server::{closed_base_url, local_client, StubServer};
    use serde_json::json;

    #[test]
    fn test_maps_photos_and_skips_items_without_url() {
        let response: PhotoSearchResponse = serde_json::from_value(json!({
            "photos": [
                {"src": {"large2x": "https://images.pexels.com/1.jpeg"}, "photographer": "Asha"},
                {"src": {}, "photographer": "Nobody"},
                {"src": {"large2x": "https://images.pexels.com/3.jpeg"}}
            ]
        }))
        .unwrap();

        let assets = map_photos(response);

        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].url, "https://images.pexels.com/1.jpeg");
        assert_eq!(assets[0].credit, "Asha");
        assert_eq!(assets[1].credit, "Pexels");
        assert!(assets.iter().all(|a| a.source == MediaSource::Pexels));
    }

    #[test]
    fn test_maps_videos_with_hd_selection() {
        let response: VideoSearchResponse = serde_json::from_value(json!({
            "videos": [
                {
                    "user": {"name": "Ravi"},
                    "video_files": [
                        {"width": 3840, "height": 2160, "link": "https://v.pexels.com/uhd.mp4"},
                        {"width": 1920, "height": 1080, "link": "https://v.pexels.com/hd.mp4"},
                        {"width": 640, "height": 360, "link": "https://v.pexels.com/sd.mp4"}
                    ]
                },
                {
                    "user": {"name": "Empty"},
                    "video_files": []
                },
                {
                    "user": {"name": "Meera"},
                    "video_files": [
                        {"width": null, "height": null, "link": "https://v.pexels.com/unknown.mp4"}
                    ]
                }
            ]
        }))
        .unwrap();

        let assets = map_videos(response);

        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].url, "https://v.pexels.com/hd.mp4");
        assert_eq!(assets[0].credit, "Ravi");
        assert_eq!(assets[1].url, "https://v.pexels.com/unknown.mp4");
    }

    #[test]
    fn test_missing_result_list_maps_to_nothing() {
        let response: PhotoSearchResponse = serde_json::from_value(json!({"error": "x"})).unwrap();
        assert!(map_photos(response).is_empty());
    }

    #[test]
    fn test_unconfigured_provider_returns_empty_without_request() {
        let provider = PexelsProvider::new(local_client(), None)
            .with_base_url("http://127.0.0.1:9/");

        let result =
            tokio_test::block_on(provider.fetch(&ProviderQuery::photos("Goa", 3)));
        assert!(matches!(result, Err(ProviderError::MissingCredential)));

        let assets = tokio_test::block_on(provider.search(&ProviderQuery::videos("Goa", 3)));
        assert!(assets.is_empty());
    }

    #[actix_rt::test]
    async fn test_video_search_request_and_hd_rendition() {
        let body = json!({
            "videos": [{
                "user": {"name": "Ravi"},
                "video_files": [
                    {"width": 3840, "height": 2160, "link": "https://v.pexels.com/4k.mp4"},
                    {"width": 1280, "height": 720, "link": "https://v.pexels.com/hd.mp4"}
                ]
            }]
        });
        let server = StubServer::start("200 OK", &body.to_string(), "/v1/");
        let provider = PexelsProvider::new(local_client(), Some("pexels-key".to_string()))
            .with_base_url(server.base_url.clone());

        let assets = provider.search(&ProviderQuery::videos("Goa", 3)).await;

        assert_eq!(
            assets,
            vec![MediaAsset::new("https://v.pexels.com/hd.mp4", "Ravi", MediaSource::Pexels)]
        );
        let request = server.received();
        assert!(request.starts_with(
            "GET /v1/videos/search?query=Goa&per_page=3&orientation=landscape HTTP/1.1"
        ));
        assert!(request.to_lowercase().contains("authorization: pexels-key"));
    }

    #[actix_rt::test]
    async fn test_error_status_is_reported_and_searched_as_empty() {
        let server = StubServer::start("500 Internal Server Error", "{}", "/v1/");
        let provider = PexelsProvider::new(local_client(), Some("key".to_string()))
            .with_base_url(server.base_url.clone());
        let result = provider.fetch(&ProviderQuery::photos("Goa", 3)).await;
        assert!(matches!(result, Err(ProviderError::Status(status)) if status.as_u16() == 500));

        let server = StubServer::start("500 Internal Server Error", "{}", "/v1/");
        let provider = PexelsProvider::new(local_client(), Some("key".to_string()))
            .with_base_url(server.base_url.clone());
        assert!(provider.search(&ProviderQuery::photos("Goa", 3)).await.is_empty());
    }

    #[actix_rt::test]
    async fn test_unreadable_body_is_malformed() {
        let server = StubServer::start("200 OK", "<html>not json</html>", "/v1/");
        let provider = PexelsProvider::new(local_client(), Some("key".to_string()))
            .with_base_url(server.base_url.clone());

        let result = provider.fetch(&ProviderQuery::photos("Goa", 3)).await;

        assert!(matches!(result, Err(ProviderError::Malformed(_))));
    }

    #[actix_rt::test]
    async fn test_unreachable_host_is_a_transport_error() {
        let provider = PexelsProvider::new(local_client(), Some("key".to_string()))
            .with_base_url(closed_base_url());

        let result = provider.fetch(&ProviderQuery::photos("Goa", 3)).await;
        assert!(matches!(result, Err(ProviderError::Transport(_))));

        assert!(provider.search(&ProviderQuery::photos("Goa", 3)).await.is_empty());
    }
}
