use crate::models::media::VideoRendition;

/// Width band treated as HD (720p through 1080p).
pub const HD_MIN_WIDTH: u32 = 1280;
pub const HD_MAX_WIDTH: u32 = 1920;

/// Picks the rendition to stream for one video.
///
/// The largest rendition inside the HD band wins. Without any HD rendition the
/// largest one overall is used, which keeps tiny previews out when only SD or
/// 4K files exist. Equal areas resolve to the earliest rendition in input order.
pub fn select_rendition(renditions: &[VideoRendition]) -> Option<&VideoRendition> {
    let hd_band = renditions
        .iter()
        .filter(|rendition| (HD_MIN_WIDTH..=HD_MAX_WIDTH).contains(&rendition.width));

    largest_by_area(hd_band).or_else(|| largest_by_area(renditions.iter()))
}

fn largest_by_area<'a>(
    renditions: impl Iterator<Item = &'a VideoRendition>,
) -> Option<&'a VideoRendition> {
    renditions.fold(None, |best, candidate| match best {
        Some(current) if current.area() >= candidate.area() => Some(current),
        _ => Some(candidate),
    })
}
