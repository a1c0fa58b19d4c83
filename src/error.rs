use crate::decode::DecodeAttempt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RescaleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no decoder could read {}, tried {}", path.display(), attempts.len())]
    DecodeFailed {
        path: PathBuf,
        attempts: Vec<DecodeAttempt>,
    },

    #[error("no sizing parameter supplied: need width, height or scale_factor")]
    MissingSizeSpec,

    #[error("scale factor must be a positive finite number, got {0}")]
    InvalidScaleFactor(f64),

    #[error("width and height must be positive, got {0}x{1}")]
    InvalidDimensions(u32, u32),

    #[error("computed target size {0}x{1} is empty")]
    EmptyTarget(u32, u32),

    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("resampling error: {0}")]
    Resample(#[from] fast_image_resize::ResizeError),

    #[error("failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

pub type Result<T> = std::result::Result<T, RescaleError>;
