//! Cascading decoder fallback.
//!
//! Decoders are tried in a fixed order, each exactly once, stopping at the
//! first success. Every decoder normalizes its output into the crate-wide
//! channel convention (RGBA8), so the rest of the pipeline never sees a
//! decoder-specific pixel layout.

use crate::avif;
use crate::error::{RescaleError, Result};
use image::{ImageReader, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// One failed decode, kept for diagnostics when the whole cascade fails.
#[derive(Debug, Clone)]
pub struct DecodeAttempt {
    pub decoder: &'static str,
    pub reason: String,
}

/// A single decoding capability in the fallback cascade.
pub trait Decoder {
    fn name(&self) -> &'static str;

    /// Decode the file into the RGBA8 internal convention.
    /// The error is a human-readable reason used only for reporting.
    fn decode(&self, path: &Path) -> std::result::Result<RgbaImage, String>;
}

/// Primary decoder: the `image` crate with content-based format sniffing.
/// Covers JPEG, PNG, WebP, TIFF, BMP and GIF.
pub struct GenericDecoder;

impl Decoder for GenericDecoder {
    fn name(&self) -> &'static str {
        "image"
    }

    fn decode(&self, path: &Path) -> std::result::Result<RgbaImage, String> {
        let reader = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| e.to_string())?;
        let decoded = reader.decode().map_err(|e| e.to_string())?;
        Ok(decoded.to_rgba8())
    }
}

/// Secondary decoder: libwebp. Takes over when the primary rejects a WebP
/// bitstream. Native RGB/RGBA output is converted to RGBA8.
pub struct WebpDecoder;

impl Decoder for WebpDecoder {
    fn name(&self) -> &'static str {
        "webp"
    }

    fn decode(&self, path: &Path) -> std::result::Result<RgbaImage, String> {
        let data = fs::read(path).map_err(|e| e.to_string())?;
        let decoded = webp::Decoder::new(&data)
            .decode()
            .ok_or_else(|| "not a decodable WebP bitstream".to_string())?;
        Ok(decoded.to_image().to_rgba8())
    }
}

/// Tertiary decoder: AVIF, which neither of the first two can read.
pub struct AvifDecoder;

impl Decoder for AvifDecoder {
    fn name(&self) -> &'static str {
        "avif"
    }

    fn decode(&self, path: &Path) -> std::result::Result<RgbaImage, String> {
        avif::decode_rgba(path)
    }
}

static DECODERS: [&(dyn Decoder + Sync); 3] = [&GenericDecoder, &WebpDecoder, &AvifDecoder];

/// Try each decoder in order, returning the first successful raster and the
/// name of the decoder that produced it.
///
/// When every decoder fails, the per-decoder failure reasons are collected
/// into [`RescaleError::DecodeFailed`]; nothing is retried.
pub fn decode_with_fallback(path: &Path) -> Result<(RgbaImage, &'static str)> {
    let mut attempts: Vec<DecodeAttempt> = Vec::new();

    for decoder in DECODERS {
        match decoder.decode(path) {
            Ok(raster) => {
                if !attempts.is_empty() {
                    crate::detail!(
                        "fell back to the {} decoder after {} failed attempt(s)",
                        decoder.name(),
                        attempts.len()
                    );
                }
                return Ok((raster, decoder.name()));
            }
            Err(reason) => {
                crate::detail!("{} decoder could not read {:?}: {}", decoder.name(), path, reason);
                attempts.push(DecodeAttempt {
                    decoder: decoder.name(),
                    reason,
                });
            }
        }
    }

    Err(RescaleError::DecodeFailed {
        path: PathBuf::from(path),
        attempts,
    })
}
