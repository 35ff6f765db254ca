//! File-level watermarking: loading, previewing and saving.

use std::path::{Path, PathBuf};

use image::buffer::ConvertBuffer;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use log::{debug, info};

use crate::compositor;
use crate::error::{Error, Result};
use crate::params::WatermarkParams;
use crate::preview::{self, PREVIEW_SIZE};

/// File name used when only an output directory is given.
pub const DEFAULT_OUTPUT_NAME: &str = "watermarked_image.png";

/// JPEG quality used when saving.
const JPEG_QUALITY: u8 = 95;

/// Result of processing a single image file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the input file.
    pub path: PathBuf,
    /// Path the result was (or would have been) written to.
    pub output: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
}

/// A decoded watermark ready to be applied to any number of base images.
#[derive(Debug, Clone)]
pub struct Watermarker {
    watermark: DynamicImage,
}

impl Watermarker {
    /// Wrap an already decoded watermark image.
    #[must_use]
    pub fn new(watermark: DynamicImage) -> Self {
        Self { watermark }
    }

    /// Load and decode a watermark from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the file cannot be read or decoded.
    pub fn open(path: &Path) -> Result<Self> {
        let watermark = load_image(path)?;
        debug!(
            "loaded watermark {} ({}x{})",
            path.display(),
            watermark.width(),
            watermark.height()
        );
        Ok(Self::new(watermark))
    }

    /// The decoded watermark.
    #[must_use]
    pub fn watermark(&self) -> &DynamicImage {
        &self.watermark
    }

    /// Composite the watermark onto `base` at full resolution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `params` fails validation.
    pub fn apply(&self, base: &DynamicImage, params: &WatermarkParams) -> Result<RgbaImage> {
        compositor::composite(base, &self.watermark, params)
    }

    /// Composite the watermark onto a thumbnail of `base` that fits
    /// [`PREVIEW_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `params` fails validation.
    pub fn preview(&self, base: &DynamicImage, params: &WatermarkParams) -> Result<RgbaImage> {
        let thumb = preview::thumbnail(base, PREVIEW_SIZE.0, PREVIEW_SIZE.1);
        compositor::composite(&thumb, &self.watermark, params)
    }

    /// Process a single image file: load, composite, save.
    ///
    /// With `preview_only` set, the preview-sized render is saved instead of
    /// the full-resolution one. Failures are reported in the returned
    /// [`ProcessResult`] rather than as an error.
    #[must_use]
    pub fn process_file(
        &self,
        input: &Path,
        output: &Path,
        params: &WatermarkParams,
        preview_only: bool,
    ) -> ProcessResult {
        let mut result = ProcessResult {
            path: input.to_path_buf(),
            output: output.to_path_buf(),
            success: false,
            message: String::new(),
        };

        let base = match load_image(input) {
            Ok(img) => img,
            Err(e) => {
                result.message = format!("Failed to load: {e}");
                return result;
            }
        };

        let rendered = if preview_only {
            self.preview(&base, params)
        } else {
            self.apply(&base, params)
        };
        let rendered = match rendered {
            Ok(img) => img,
            Err(e) => {
                result.message = format!("Failed to composite: {e}");
                return result;
            }
        };

        match save_image(&rendered, output) {
            Ok(()) => {
                result.success = true;
                result.message = format!(
                    "Saved {}x{} watermarked image",
                    rendered.width(),
                    rendered.height()
                );
            }
            Err(e) => {
                result.message = format!("Failed to save: {e}");
            }
        }

        result
    }
}

/// Load and decode an image file of any format the `image` crate supports.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Check if a file has a supported input image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg"),
        None => false,
    }
}

/// Find the first supported image file in `dir`, by file name.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory cannot be read.
pub fn first_image_in_dir(dir: &Path) -> Result<Option<PathBuf>> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| is_supported_image(p))
        .collect();
    candidates.sort();
    Ok(candidates.into_iter().next())
}

/// Resolve an input path to an image file.
///
/// Files are returned as-is; for directories the first supported image is
/// used.
///
/// # Errors
///
/// Returns [`Error::NoImageFound`] if a directory holds no supported image, or
/// [`Error::Io`] if it cannot be read.
pub fn resolve_input(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        first_image_in_dir(path)?.ok_or_else(|| Error::NoImageFound(path.to_path_buf()))
    } else {
        Ok(path.to_path_buf())
    }
}

/// Output path inside `output_dir`: `output_dir/watermarked_image.png`.
#[must_use]
pub fn default_output_path(output_dir: &Path) -> PathBuf {
    output_dir.join(DEFAULT_OUTPUT_NAME)
}

/// Save an image flattened to RGB, choosing the encoder from the extension.
///
/// The alpha channel is dropped, not matted. Missing parent directories are
/// created.
///
/// # Errors
///
/// Returns an error if the format is unsupported or writing fails.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let rgb: RgbImage = img.convert();

    match format {
        ImageFormat::Jpeg => {
            let file = std::fs::File::create(path)?;
            let mut encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(file, JPEG_QUALITY);
            encoder.encode_image(&rgb)?;
        }
        ImageFormat::Png | ImageFormat::Bmp => {
            rgb.save_with_format(path, format)?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!("{format:?}")));
        }
    }

    info!("saved watermarked image to {}", path.display());
    Ok(())
}
