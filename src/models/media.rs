use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaSource {
    Pexels,
    Unsplash,
    Pixabay,
    Static,
}

impl MediaSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaSource::Pexels => "Pexels",
            MediaSource::Unsplash => "Unsplash",
            MediaSource::Pixabay => "Pixabay",
            MediaSource::Static => "Static",
        }
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

/// A photo or video URL with its attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub url: String,
    pub credit: String,
    pub source: MediaSource,
}

impl MediaAsset {
    pub fn new(url: impl Into<String>, credit: impl Into<String>, source: MediaSource) -> Self {
        Self {
            url: url.into(),
            credit: credit.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderQuery {
    pub text: String,
    pub kind: MediaKind,
    pub count: u32,
}

impl ProviderQuery {
    /// `count` is clamped to at least one item.
    pub fn new(text: impl Into<String>, kind: MediaKind, count: u32) -> Self {
        Self {
            text: text.into(),
            kind,
            count: count.max(1),
        }
    }

    pub fn photos(text: impl Into<String>, count: u32) -> Self {
        Self::new(text, MediaKind::Photo, count)
    }

    pub fn videos(text: impl Into<String>, count: u32) -> Self {
        Self::new(text, MediaKind::Video, count)
    }
}

/// One encoded file of a provider video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRendition {
    pub width: u32,
    pub height: u32,
    pub link: String,
}

impl VideoRendition {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}
