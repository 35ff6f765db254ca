//! Alpha adjustments applied to the watermark before it is composited.
//!
//! Pasting and "over" compositing themselves are done with
//! [`image::imageops::replace`] and [`image::imageops::overlay`].

use image::RgbaImage;

/// Scale the alpha channel of every pixel by `opacity`.
///
/// The multiplication is uniform, so transparency already present in the image
/// is preserved proportionally. An opacity of `1.0` (or more) leaves the image
/// untouched.
pub fn apply_opacity(image: &mut RgbaImage, opacity: f32) {
    if opacity >= 1.0 {
        return;
    }
    let opacity = opacity.max(0.0);
    for px in image.pixels_mut() {
        px[3] = to_channel(f32::from(px[3]) * opacity);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
