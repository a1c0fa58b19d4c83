pub mod avif;
pub mod decode;
pub mod error;
pub mod formats;
pub mod logger;
pub mod processing;
pub mod sizing;

pub use decode::{decode_with_fallback, DecodeAttempt, Decoder};
pub use error::{RescaleError, Result};
pub use formats::OutputFormat;
pub use processing::{resample, rescale_file, resize_image, save_raster, ResizeOutcome};
pub use sizing::SizeSpec;
