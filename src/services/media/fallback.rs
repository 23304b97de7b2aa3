use rand::seq::SliceRandom;

use crate::models::media::{MediaAsset, MediaSource};

/// (url, credit) pairs served when every image provider comes back empty.
pub const STATIC_FALLBACK_IMAGES: &[(&str, &str)] = &[
    (
        "https://images.unsplash.com/photo-1476514525535-07fb3b4ae5f1",
        "Unsplash",
    ),
    (
        "https://images.unsplash.com/photo-1506012787146-f92b2d7d6d96",
        "Unsplash",
    ),
    (
        "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb",
        "Unsplash",
    ),
    (
        "https://images.pexels.com/photos/346885/pexels-photo-346885.jpeg",
        "Pexels",
    ),
    (
        "https://images.pexels.com/photos/1659438/pexels-photo-1659438.jpeg",
        "Pexels",
    ),
];

pub const STATIC_FALLBACK_VIDEOS: &[(&str, &str)] = &[
    (
        "https://videos.pexels.com/video-files/4125028/4125028-hd_1920_1080_25fps.mp4",
        "Rostislav Uzunov",
    ),
    (
        "https://videos.pexels.com/video-files/855018/855018-hd_1920_1080_30fps.mp4",
        "Pexels",
    ),
    (
        "https://videos.pexels.com/video-files/2169880/2169880-hd_1920_1080_30fps.mp4",
        "Pexels",
    ),
];

pub fn static_images() -> Vec<MediaAsset> {
    to_assets(STATIC_FALLBACK_IMAGES)
}

pub fn static_videos() -> Vec<MediaAsset> {
    to_assets(STATIC_FALLBACK_VIDEOS)
}

// Unseeded: repeated calls for the same query may differ.
pub fn random_static_image() -> MediaAsset {
    pick(STATIC_FALLBACK_IMAGES)
}

pub fn random_static_video() -> MediaAsset {
    pick(STATIC_FALLBACK_VIDEOS)
}

fn pick(table: &[(&str, &str)]) -> MediaAsset {
    let (url, credit) = table
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(table[0]);
    MediaAsset::new(url, credit, MediaSource::Static)
}

fn to_assets(table: &[(&str, &str)]) -> Vec<MediaAsset> {
    table
        .iter()
        .map(|(url, credit)| MediaAsset::new(*url, *credit, MediaSource::Static))
        .collect()
}
