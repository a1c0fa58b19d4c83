use crate::error::{RescaleError, Result};

/// One of four mutually exclusive sizing modes.
///
/// The original optional-parameter surface left precedence implicit; the
/// tagged variant makes it explicit. [`SizeSpec::from_parts`] encodes the
/// priority order: a scale factor wins over explicit dimensions, both
/// dimensions win over a single one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeSpec {
    /// Both axes multiplied by the factor, rounded to the nearest pixel.
    Scale(f64),
    /// Exact target dimensions, aspect ratio ignored.
    Exact { width: u32, height: u32 },
    /// Fixed width, height derived to preserve the aspect ratio.
    WidthOnly(u32),
    /// Fixed height, width derived to preserve the aspect ratio.
    HeightOnly(u32),
}

impl SizeSpec {
    /// Select the sizing mode from the optional parameters.
    ///
    /// Zero dimensions and non-positive or non-finite scale factors are
    /// rejected here, before any filesystem I/O happens. Supplying nothing
    /// is [`RescaleError::MissingSizeSpec`].
    pub fn from_parts(
        width: Option<u32>,
        height: Option<u32>,
        scale_factor: Option<f64>,
    ) -> Result<Self> {
        if let Some(factor) = scale_factor {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(RescaleError::InvalidScaleFactor(factor));
            }
            return Ok(SizeSpec::Scale(factor));
        }

        if width == Some(0) || height == Some(0) {
            return Err(RescaleError::InvalidDimensions(
                width.unwrap_or(0),
                height.unwrap_or(0),
            ));
        }

        match (width, height) {
            (Some(width), Some(height)) => Ok(SizeSpec::Exact { width, height }),
            (Some(width), None) => Ok(SizeSpec::WidthOnly(width)),
            (None, Some(height)) => Ok(SizeSpec::HeightOnly(height)),
            (None, None) => Err(RescaleError::MissingSizeSpec),
        }
    }

    /// Resolve the target dimensions for an image of the given original size.
    ///
    /// Derived axes round to the nearest pixel. A target with an empty axis
    /// (e.g. a tiny scale factor on a narrow image) is an error rather than
    /// being clamped to 1.
    pub fn target(&self, original_width: u32, original_height: u32) -> Result<(u32, u32)> {
        let (width, height) = match *self {
            SizeSpec::Scale(factor) => (
                scaled(original_width, factor),
                scaled(original_height, factor),
            ),
            SizeSpec::Exact { width, height } => (width, height),
            SizeSpec::WidthOnly(width) => {
                let ratio = width as f64 / original_width as f64;
                (width, scaled(original_height, ratio))
            }
            SizeSpec::HeightOnly(height) => {
                let ratio = height as f64 / original_height as f64;
                (scaled(original_width, ratio), height)
            }
        };

        if width == 0 || height == 0 {
            return Err(RescaleError::EmptyTarget(width, height));
        }
        Ok((width, height))
    }
}

fn scaled(dimension: u32, factor: f64) -> u32 {
    (dimension as f64 * factor).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_factor_takes_precedence() {
        let spec = SizeSpec::from_parts(Some(600), Some(450), Some(0.5)).unwrap();
        assert_eq!(spec, SizeSpec::Scale(0.5));
    }

    #[test]
    fn both_dimensions_selects_exact() {
        let spec = SizeSpec::from_parts(Some(600), Some(450), None).unwrap();
        assert_eq!(
            spec,
            SizeSpec::Exact {
                width: 600,
                height: 450
            }
        );
    }

    #[test]
    fn single_dimension_modes() {
        assert_eq!(
            SizeSpec::from_parts(Some(600), None, None).unwrap(),
            SizeSpec::WidthOnly(600)
        );
        assert_eq!(
            SizeSpec::from_parts(None, Some(300), None).unwrap(),
            SizeSpec::HeightOnly(300)
        );
    }

    #[test]
    fn nothing_supplied_is_an_error() {
        let result = SizeSpec::from_parts(None, None, None);
        assert!(matches!(result, Err(RescaleError::MissingSizeSpec)));
    }

    #[test]
    fn zero_dimensions_rejected() {
        let result = SizeSpec::from_parts(Some(0), Some(450), None);
        assert!(matches!(result, Err(RescaleError::InvalidDimensions(0, 450))));

        let result = SizeSpec::from_parts(None, Some(0), None);
        assert!(matches!(result, Err(RescaleError::InvalidDimensions(0, 0))));
    }

    #[test]
    fn bad_scale_factors_rejected() {
        for factor in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            let result = SizeSpec::from_parts(None, None, Some(factor));
            assert!(
                matches!(result, Err(RescaleError::InvalidScaleFactor(_))),
                "factor {factor} should be rejected"
            );
        }
    }

    #[test]
    fn exact_ignores_aspect_ratio() {
        let spec = SizeSpec::Exact {
            width: 600,
            height: 450,
        };
        assert_eq!(spec.target(800, 600).unwrap(), (600, 450));
        assert_eq!(spec.target(1000, 100).unwrap(), (600, 450));
    }

    #[test]
    fn width_only_derives_height() {
        // 1000x500 at width 600 keeps the 2:1 aspect ratio
        let spec = SizeSpec::WidthOnly(600);
        assert_eq!(spec.target(1000, 500).unwrap(), (600, 300));
    }

    #[test]
    fn height_only_derives_width() {
        let spec = SizeSpec::HeightOnly(300);
        assert_eq!(spec.target(500, 1000).unwrap(), (150, 300));
    }

    #[test]
    fn derived_axis_rounds_to_nearest() {
        // 333 * (100 / 500) = 66.6 -> 67
        let spec = SizeSpec::WidthOnly(100);
        assert_eq!(spec.target(500, 333).unwrap(), (100, 67));
    }

    #[test]
    fn scale_rounds_both_axes() {
        let spec = SizeSpec::Scale(0.5);
        assert_eq!(spec.target(400, 400).unwrap(), (200, 200));
        // 333 * 0.5 = 166.5 -> 167 (round half away from zero)
        assert_eq!(spec.target(333, 333).unwrap(), (167, 167));
    }

    #[test]
    fn degenerate_target_is_an_error() {
        let spec = SizeSpec::Scale(0.001);
        let result = spec.target(100, 100);
        assert!(matches!(result, Err(RescaleError::EmptyTarget(0, 0))));
    }
}
