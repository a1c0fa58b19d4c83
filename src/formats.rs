use crate::error::{RescaleError, Result};
use image::ImageFormat;
use std::path::Path;

/// Output encodings selectable through a file extension.
///
/// The output format is always implied by the output path; there is no
/// format override parameter. An unknown or missing extension is an error
/// rather than silently falling back to JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
    Avif,
    Bmp,
    Tiff,
    Gif,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                RescaleError::UnsupportedFormat(format!(
                    "{} has no file extension",
                    path.display()
                ))
            })?;
        Self::from_extension(extension)
            .ok_or_else(|| RescaleError::UnsupportedFormat(extension.to_string()))
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "webp" => Some(OutputFormat::WebP),
            "avif" => Some(OutputFormat::Avif),
            "bmp" => Some(OutputFormat::Bmp),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            "gif" => Some(OutputFormat::Gif),
            _ => None,
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::WebP => ImageFormat::WebP,
            OutputFormat::Avif => ImageFormat::Avif,
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::Gif => ImageFormat::Gif,
        }
    }

    /// Whether the encoder accepts an alpha channel. JPEG does not, so
    /// RGBA rasters are flattened to RGB before encoding.
    pub fn supports_alpha(&self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }
}
