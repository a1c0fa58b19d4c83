use crate::decode;
use crate::error::{RescaleError, Result};
use crate::formats::OutputFormat;
use crate::logger::Verbosity;
use crate::sizing::SizeSpec;
use fast_image_resize::{FilterType, ResizeAlg, ResizeOptions, Resizer};
use image::DynamicImage;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// What a successful resize actually did, for callers that want more than
/// the boolean contract.
#[derive(Debug, Clone)]
pub struct ResizeOutcome {
    /// Name of the decoder in the cascade that read the input.
    pub decoder: &'static str,
    pub original: (u32, u32),
    pub target: (u32, u32),
    pub output: PathBuf,
}

/// Typed pipeline: decode (with fallback) -> resolve dimensions ->
/// resample -> encode to the path's format.
///
/// When `output` is `None` the input file is overwritten in place.
/// Nothing is written unless decode and dimension resolution both succeed.
pub fn rescale_file(
    input: &Path,
    output: Option<&Path>,
    spec: &SizeSpec,
) -> Result<ResizeOutcome> {
    let pb = spinner("Decoding image...");
    let decoded = decode::decode_with_fallback(input);
    pb.finish_and_clear();
    let (raster, decoder) = decoded?;

    let (original_width, original_height) = raster.dimensions();
    crate::info!("📏 Original dimensions: {}x{}", original_width, original_height);
    crate::info!("📖 Decoded with the {} decoder", decoder);

    let (target_width, target_height) = spec.target(original_width, original_height)?;
    crate::info!("🎯 Target dimensions: {}x{}", target_width, target_height);

    let image = DynamicImage::ImageRgba8(raster);
    let resized = resample(&image, target_width, target_height)?;

    let output_path = output.unwrap_or(input);
    let pb = spinner("Encoding image...");
    let saved = save_raster(&resized, output_path);
    pb.finish_and_clear();
    saved?;
    crate::info!("✅ Saved to {:?}", output_path);

    Ok(ResizeOutcome {
        decoder,
        original: (original_width, original_height),
        target: (target_width, target_height),
        output: output_path.to_path_buf(),
    })
}

/// The boolean contract: every failure is reported on stderr and converted
/// to `false`; nothing propagates to the caller, panics included.
///
/// Sizing parameters are validated before any filesystem access, so an
/// unusable combination performs no I/O at all.
pub fn resize_image(
    input: &Path,
    output: Option<&Path>,
    width: Option<u32>,
    height: Option<u32>,
    scale_factor: Option<f64>,
) -> bool {
    let spec = match SizeSpec::from_parts(width, height, scale_factor) {
        Ok(spec) => spec,
        Err(e) => {
            crate::error!("{e}");
            return false;
        }
    };

    match panic::catch_unwind(AssertUnwindSafe(|| rescale_file(input, output, &spec))) {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            crate::error!("{e}");
            if let RescaleError::DecodeFailed { attempts, .. } = &e {
                for attempt in attempts {
                    crate::error!("  {} decoder: {}", attempt.decoder, attempt.reason);
                }
            }
            false
        }
        Err(_) => {
            crate::error!("unexpected internal failure while processing {:?}", input);
            false
        }
    }
}

/// Area-averaging resample (box convolution over the source footprint).
/// An identity target returns the raster unchanged.
pub fn resample(image: &DynamicImage, dst_width: u32, dst_height: u32) -> Result<DynamicImage> {
    if image.width() == dst_width && image.height() == dst_height {
        return Ok(image.clone());
    }
    let mut resizer = Resizer::new();
    let mut dst_image = DynamicImage::new(dst_width, dst_height, image.color());
    let options = ResizeOptions::default().resize_alg(ResizeAlg::Convolution(FilterType::Box));
    resizer.resize(image, &mut dst_image, Some(&options))?;
    Ok(dst_image)
}

/// Encode to the format implied by the output extension, creating parent
/// directories as needed. Alpha-less formats get an RGB8-flattened copy.
pub fn save_raster(image: &DynamicImage, output: &Path) -> Result<()> {
    let format = OutputFormat::from_path(output)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|_| RescaleError::DirectoryCreationFailed(parent.to_path_buf()))?;
        }
    }

    if format.supports_alpha() {
        image.save_with_format(output, format.image_format())?;
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(output, format.image_format())?;
    }
    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    if crate::logger::verbosity() == Verbosity::Silent {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn resample_hits_exact_target() {
        let image = DynamicImage::new_rgba8(800, 600);
        let resized = resample(&image, 600, 450).unwrap();
        assert_eq!(resized.dimensions(), (600, 450));
    }

    #[test]
    fn resample_identity_is_a_noop() {
        let image = DynamicImage::new_rgba8(320, 200);
        let resized = resample(&image, 320, 200).unwrap();
        assert_eq!(resized.dimensions(), (320, 200));
    }

    #[test]
    fn resample_upscales_too() {
        let image = DynamicImage::new_rgba8(100, 100);
        let resized = resample(&image, 150, 150).unwrap();
        assert_eq!(resized.dimensions(), (150, 150));
    }

    #[test]
    fn resample_preserves_solid_color() {
        let image = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            64,
            64,
            image::Rgba([200, 100, 50, 255]),
        ));
        let resized = resample(&image, 16, 16).unwrap();
        // averaging a constant field changes nothing
        assert_eq!(resized.get_pixel(8, 8).0, [200, 100, 50, 255]);
    }

    #[test]
    fn save_raster_flattens_alpha_for_jpeg() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("flat.jpg");
        let image = DynamicImage::new_rgba8(32, 24);

        save_raster(&image, &path).unwrap();

        let reread = image::open(&path).unwrap();
        assert_eq!(reread.dimensions(), (32, 24));
    }

    #[test]
    fn save_raster_rejects_unknown_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.xyz");
        let image = DynamicImage::new_rgba8(8, 8);

        let result = save_raster(&image, &path);
        assert!(matches!(result, Err(RescaleError::UnsupportedFormat(_))));
        assert!(!path.exists());
    }

    #[test]
    fn save_raster_creates_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("out.png");
        let image = DynamicImage::new_rgba8(8, 8);

        save_raster(&image, &path).unwrap();
        assert!(path.exists());
    }
}
