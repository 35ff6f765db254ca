//! Watermark placement parameters.

use crate::error::{Error, Result};

/// Parameters controlling how a watermark is applied to a base image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkParams {
    /// Alpha multiplier applied to the watermark, in `[0, 1]`.
    pub opacity: f32,
    /// Watermark size as a percentage of the base image dimensions, in `(0, 100]`.
    pub size_percent: f32,
    /// Horizontal placement as a fraction of the free space, in `[0, 1]`.
    /// Ignored when tiling.
    pub position_x: f32,
    /// Vertical placement as a fraction of the free space, in `[0, 1]`.
    /// Ignored when tiling.
    pub position_y: f32,
    /// Repeat the watermark across the whole base image.
    pub tile: bool,
}

impl Default for WatermarkParams {
    fn default() -> Self {
        Self {
            opacity: 0.5,
            size_percent: 25.0,
            position_x: 0.5,
            position_y: 0.5,
            tile: false,
        }
    }
}

impl WatermarkParams {
    /// Check every field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_unit("opacity", self.opacity)?;
        check_unit("position_x", self.position_x)?;
        check_unit("position_y", self.position_y)?;

        if !self.size_percent.is_finite() || self.size_percent <= 0.0 || self.size_percent > 100.0
        {
            return Err(Error::InvalidParameter {
                name: "size_percent",
                value: self.size_percent,
                expected: "a percentage in (0, 100]",
            });
        }

        Ok(())
    }
}

fn check_unit(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            value,
            expected: "a fraction in [0, 1]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = WatermarkParams::default();
        assert!(params.validate().is_ok());
        assert!(!params.tile);
        assert!((params.size_percent - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn bounds_are_inclusive() {
        let params = WatermarkParams {
            opacity: 0.0,
            size_percent: 100.0,
            position_x: 1.0,
            position_y: 0.0,
            tile: true,
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_size() {
        for size in [0.0, -5.0] {
            let params = WatermarkParams {
                size_percent: size,
                ..WatermarkParams::default()
            };
            let err = params.validate().unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidParameter {
                    name: "size_percent",
                    ..
                }
            ));
        }
    }

    #[test]
    fn rejects_oversized_and_non_finite_values() {
        let too_big = WatermarkParams {
            size_percent: 150.0,
            ..WatermarkParams::default()
        };
        assert!(too_big.validate().is_err());

        let nan_opacity = WatermarkParams {
            opacity: f32::NAN,
            ..WatermarkParams::default()
        };
        assert!(matches!(
            nan_opacity.validate(),
            Err(Error::InvalidParameter { name: "opacity", .. })
        ));

        let off_canvas = WatermarkParams {
            position_y: 1.01,
            ..WatermarkParams::default()
        };
        assert!(matches!(
            off_canvas.validate(),
            Err(Error::InvalidParameter {
                name: "position_y",
                ..
            })
        ));
    }
}
