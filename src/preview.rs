//! Preview-sized renders.
//!
//! Previews are produced by shrinking the base image to fit [`PREVIEW_SIZE`]
//! before compositing, so the watermark is scaled relative to the preview.

use image::imageops::FilterType;
use image::DynamicImage;

/// Bounding box of a preview render, in pixels.
pub const PREVIEW_SIZE: (u32, u32) = (400, 400);

/// Resampling filter for thumbnails (bicubic).
const THUMBNAIL_FILTER: FilterType = FilterType::CatmullRom;

/// Shrink `image` to fit within `max_width` x `max_height`, keeping its aspect
/// ratio. Images that already fit are returned unchanged.
#[must_use]
pub fn thumbnail(image: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let size = (image.width(), image.height());
    let (w, h) = thumbnail_size(size, (max_width, max_height));
    if (w, h) == size {
        return image.clone();
    }
    image.resize_exact(w, h, THUMBNAIL_FILTER)
}

/// Dimensions [`thumbnail`] would produce for an image of `size`.
///
/// The side constrained by the box is set to the box; the other side is the
/// floor or ceiling of its scaled length, whichever keeps the aspect ratio
/// closer, and never less than one pixel.
#[must_use]
pub fn thumbnail_size(size: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (width, height) = size;
    let (max_w, max_h) = bounds;
    if width <= max_w && height <= max_h {
        return size;
    }
    if width == 0 || height == 0 || max_w == 0 || max_h == 0 {
        return (max_w.min(width), max_h.min(height));
    }

    let aspect = f64::from(width) / f64::from(height);
    let box_w = f64::from(max_w);
    let box_h = f64::from(max_h);

    if box_w / box_h >= aspect {
        let w = round_aspect(box_h * aspect, |n| (aspect - n / box_h).abs());
        (w, max_h)
    } else {
        let h = round_aspect(box_w / aspect, |n| (aspect - box_w / n).abs());
        (max_w, h)
    }
}

/// Pick `floor(n)` or `ceil(n)` by the smaller `error`, preferring the floor on a
/// tie, clamped to at least 1.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_aspect(n: f64, error: impl Fn(f64) -> f64) -> u32 {
    let floor = n.floor().max(1.0);
    let ceil = n.ceil().max(1.0);
    let best = if error(ceil) < error(floor) { ceil } else { floor };
    best as u32
}
