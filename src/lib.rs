//! Apply an image watermark to photos with adjustable opacity, scale and
//! placement, either once or tiled across the whole image.
//!
//! The core is [`composite`], a pure function over two decoded images and a
//! [`WatermarkParams`]. Loading, previewing and saving live in [`Watermarker`]
//! and a few free functions around it.
//!
//! # Quick Start
//!
//! ```no_run
//! use watermark_applier::{Watermarker, WatermarkParams};
//!
//! let marker = Watermarker::open("logo.png".as_ref()).expect("failed to load watermark");
//! let photo = image::open("photo.jpg").unwrap();
//! let params = WatermarkParams { opacity: 0.4, size_percent: 20.0, ..Default::default() };
//! let out = marker.apply(&photo, &params).unwrap();
//! watermark_applier::save_image(&out, "photo_marked.png".as_ref()).unwrap();
//! ```
//!
//! # Tiling
//!
//! With `tile` set, the scaled watermark is repeated over the whole image in a
//! grid starting at the top-left corner; tiles crossing the right or bottom edge
//! are clipped.
//!
//! ```
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use watermark_applier::{composite, WatermarkParams};
//!
//! let base = DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255])));
//! let mark = DynamicImage::ImageRgba8(RgbaImage::from_pixel(30, 30, Rgba([0, 0, 0, 255])));
//! let params = WatermarkParams { opacity: 1.0, size_percent: 30.0, tile: true, ..Default::default() };
//! let out = composite(&base, &mark, &params).unwrap();
//! assert_eq!(out.get_pixel(99, 99), &Rgba([0, 0, 0, 255]));
//! ```

#![deny(missing_docs)]

pub mod blending;
mod compositor;
mod engine;
pub mod error;
mod params;
pub mod preview;

pub use compositor::{composite, placement_offset, scaled_watermark_size};
pub use engine::{
    default_output_path, first_image_in_dir, is_supported_image, load_image, resolve_input,
    save_image, ProcessResult, Watermarker, DEFAULT_OUTPUT_NAME,
};
pub use error::{Error, Result};
pub use params::WatermarkParams;
pub use preview::{thumbnail, PREVIEW_SIZE};
