//! Image size selection

use super::wire::Image;

/// Preferred size of the larger image side, in pixels
pub const TARGET_SIZE: u32 = 300;
/// Images with a larger side above this are only used as a fallback
pub const MAX_SIZE: u32 = 640;

/// Pick the image closest to a medium size.
///
/// Among images with a url and known dimensions whose larger side does not
/// exceed [`MAX_SIZE`], the one whose larger side is nearest to
/// [`TARGET_SIZE`] wins; earlier images win ties. If no image qualifies the
/// first image with a url is used. `None` means there is no image at all.
pub fn preferably_medium(images: &[Image]) -> Option<String> {
    let usable = || images.iter().filter_map(|img| img.url.as_deref().map(|url| (url, img)));

    usable()
        .filter_map(|(url, img)| larger_side(img).map(|side| (url, side)))
        .filter(|(_, side)| *side <= MAX_SIZE)
        // min_by_key keeps the first minimum
        .min_by_key(|(_, side)| side.abs_diff(TARGET_SIZE))
        .map(|(url, _)| url)
        .or_else(|| usable().map(|(url, _)| url).next())
        .map(str::to_string)
}

fn larger_side(image: &Image) -> Option<u32> {
    match (image.width, image.height) {
        (Some(w), Some(h)) => Some(w.max(h)),
        (Some(side), None) | (None, Some(side)) => Some(side),
        (None, None) => None,
    }
}
