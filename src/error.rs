//! Error types for the watermark-applier crate.

use std::path::PathBuf;

/// Errors that can occur while loading, compositing or saving images.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A watermark parameter is outside its accepted range.
    #[error("invalid {name}: {value} (expected {expected})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// An image file could not be read or decoded.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying decoder error.
        source: image::ImageError,
    },

    /// A directory contains no supported image file.
    #[error("no supported image found in {}", .0.display())]
    NoImageFound(PathBuf),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output format is not supported.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred during image processing (resize, encode, save).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
