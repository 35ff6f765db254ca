//! Watermark compositing.
//!
//! [`composite`] is a pure function: it never touches the inputs and performs no
//! I/O. Both images are coerced to RGBA8 first, so any decoded color mode works.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use log::debug;

use crate::blending;
use crate::error::Result;
use crate::params::WatermarkParams;

/// Resampling filter used to scale the watermark.
const WATERMARK_FILTER: FilterType = FilterType::Lanczos3;

/// Composite `watermark` onto `base` according to `params`.
///
/// The watermark is scaled to `size_percent` of the base dimensions, its alpha
/// is multiplied by `opacity`, and it is then either placed once at the
/// fractional position or repeated across the whole base.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`](crate::Error::InvalidParameter) if
/// `params` fails validation.
pub fn composite(
    base: &DynamicImage,
    watermark: &DynamicImage,
    params: &WatermarkParams,
) -> Result<RgbaImage> {
    params.validate()?;

    let base = base.to_rgba8();
    let mark = prepare_watermark(&watermark.to_rgba8(), base.dimensions(), params);

    debug!(
        "compositing {}x{} watermark onto {}x{} base (opacity {}, tile {})",
        mark.width(),
        mark.height(),
        base.width(),
        base.height(),
        params.opacity,
        params.tile
    );

    let mut out = base;
    if params.tile {
        let layer = tile_layer(&mark, out.dimensions());
        imageops::overlay(&mut out, &layer, 0, 0);
    } else {
        let (x, y) = placement_offset(
            out.dimensions(),
            mark.dimensions(),
            params.position_x,
            params.position_y,
        );
        debug!("placing watermark at ({x}, {y})");
        imageops::overlay(&mut out, &mark, x, y);
    }
    Ok(out)
}

/// Target watermark size for a base of `base` dimensions.
///
/// Each side is `floor(side * size_percent / 100)`, never less than one pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scaled_watermark_size(base: (u32, u32), size_percent: f32) -> (u32, u32) {
    let scale = |side: u32| -> u32 {
        let scaled = (f64::from(side) * f64::from(size_percent) / 100.0).floor();
        scaled.clamp(1.0, f64::from(u32::MAX)) as u32
    };
    (scale(base.0), scale(base.1))
}

/// Top-left corner for a single watermark placement.
///
/// The free space on each axis is multiplied by the fractional position and
/// truncated toward zero. The result is negative when the watermark is larger
/// than the base on that axis.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn placement_offset(
    base: (u32, u32),
    watermark: (u32, u32),
    position_x: f32,
    position_y: f32,
) -> (i64, i64) {
    let axis = |base: u32, mark: u32, pos: f32| -> i64 {
        let free = i64::from(base) - i64::from(mark);
        (free as f64 * f64::from(pos)).trunc() as i64
    };
    (
        axis(base.0, watermark.0, position_x),
        axis(base.1, watermark.1, position_y),
    )
}

/// Scale the watermark for the given base and apply the opacity.
fn prepare_watermark(
    watermark: &RgbaImage,
    base: (u32, u32),
    params: &WatermarkParams,
) -> RgbaImage {
    let (w, h) = scaled_watermark_size(base, params.size_percent);
    let mut mark = if watermark.dimensions() == (w, h) {
        watermark.clone()
    } else {
        imageops::resize(watermark, w, h, WATERMARK_FILTER)
    };
    blending::apply_opacity(&mut mark, params.opacity);
    mark
}

/// Transparent canvas of `size` covered by copies of `tile`, left to right and
/// top to bottom. Tiles crossing the right or bottom edge are clipped.
fn tile_layer(tile: &RgbaImage, size: (u32, u32)) -> RgbaImage {
    let mut layer = RgbaImage::new(size.0, size.1);
    let (tw, th) = tile.dimensions();
    debug_assert!(tw > 0 && th > 0, "tile must not be empty");

    let mut count = 0u32;
    for y in (0..size.1).step_by(th as usize) {
        for x in (0..size.0).step_by(tw as usize) {
            imageops::replace(&mut layer, tile, i64::from(x), i64::from(y));
            count += 1;
        }
    }
    debug!("tiled {count} copies of {tw}x{th} watermark");
    layer
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn size_is_floored_percentage_of_base() {
        assert_eq!(scaled_watermark_size((200, 100), 20.0), (40, 20));
        assert_eq!(scaled_watermark_size((200, 100), 100.0), (200, 100));
        assert_eq!(scaled_watermark_size((199, 99), 25.0), (49, 24));
    }

    #[test]
    fn size_never_collapses_to_zero() {
        assert_eq!(scaled_watermark_size((3, 2), 1.0), (1, 1));
    }

    #[test]
    fn offset_uses_free_space() {
        assert_eq!(placement_offset((200, 100), (40, 20), 0.0, 0.0), (0, 0));
        assert_eq!(placement_offset((200, 100), (40, 20), 1.0, 1.0), (160, 80));
        assert_eq!(placement_offset((200, 100), (40, 20), 0.5, 0.5), (80, 40));
        // 161 * 0.5 = 80.5 truncates
        assert_eq!(placement_offset((201, 100), (40, 20), 0.5, 0.0), (80, 0));
    }

    #[test]
    fn offset_goes_negative_when_watermark_overhangs() {
        assert_eq!(placement_offset((10, 10), (20, 10), 0.5, 0.5), (-5, 0));
    }

    #[test]
    fn tile_layer_covers_canvas_with_partial_tiles() {
        let tile = RgbaImage::from_pixel(4, 3, BLUE);
        let layer = tile_layer(&tile, (10, 7));
        assert!(layer.pixels().all(|px| *px == BLUE));
    }

    #[test]
    fn tile_layer_keeps_transparent_gaps() {
        let mut tile = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        tile.put_pixel(0, 0, BLUE);
        let layer = tile_layer(&tile, (5, 5));

        for (x, y, px) in layer.enumerate_pixels() {
            let expected = if x % 2 == 0 && y % 2 == 0 {
                BLUE
            } else {
                Rgba([0, 0, 0, 0])
            };
            assert_eq!(*px, expected, "pixel ({x},{y})");
        }
    }

    #[test]
    fn prepare_keeps_same_size_watermark_untouched_at_full_opacity() {
        let mut mark = RgbaImage::from_pixel(40, 20, BLUE);
        mark.put_pixel(3, 3, Rgba([1, 2, 3, 77]));
        let params = WatermarkParams {
            opacity: 1.0,
            size_percent: 20.0,
            ..WatermarkParams::default()
        };
        let prepared = prepare_watermark(&mark, (200, 100), &params);
        assert_eq!(prepared, mark);
    }

    #[test]
    fn overhanging_placement_is_clipped() {
        let mut out = RgbaImage::from_pixel(10, 10, RED);
        let mark = RgbaImage::from_pixel(20, 10, BLUE);
        let (x, y) = placement_offset((10, 10), mark.dimensions(), 0.5, 0.5);
        imageops::overlay(&mut out, &mark, x, y);
        assert!(out.pixels().all(|px| *px == BLUE));

        let mut untouched = RgbaImage::from_pixel(4, 4, RED);
        imageops::overlay(&mut untouched, &mark, i64::MAX, 0);
        imageops::replace(&mut untouched, &mark, i64::MIN, i64::MAX);
        assert_eq!(untouched, RgbaImage::from_pixel(4, 4, RED));
    }

    #[test]
    fn composite_validates_params() {
        let base = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, RED));
        let mark = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, BLUE));
        let params = WatermarkParams {
            size_percent: 0.0,
            ..WatermarkParams::default()
        };
        assert!(composite(&base, &mark, &params).is_err());
    }
}
