//! Renderer configuration.

use crate::colors::{self, Color};
use crate::error::RenderError;

/// Largest supported supersample factor.
pub const MAX_SUPERSAMPLE: u32 = 4;

/// How depth and per-vertex shading are interpolated across a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Interpolate `1/w` in raster space and recover depth as its reciprocal;
    /// attributes are interpolated as `a/w` and divided back.
    #[default]
    PerspectiveCorrect,
    /// Interpolate depth and attributes directly in raster space. Cheaper,
    /// visibly wrong on triangles that recede steeply from the camera.
    Linear,
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interpolation::PerspectiveCorrect => write!(f, "PerspectiveCorrect"),
            Interpolation::Linear => write!(f, "Linear"),
        }
    }
}

/// Everything needed to build an [`crate::Engine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Near clip distance (positive, camera looks down -Z).
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
    /// Half of the horizontal field of view, in radians.
    pub fov_half: f64,
    pub background: Color,
    pub backface_culling: bool,
    pub interpolation: Interpolation,
    /// Internal resolution multiplier for the smoothing pass (1 = off).
    pub supersample: u32,
    /// Stop scanning a row once the triangle has been left.
    pub span_early_exit: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            near: 0.1,
            far: 1000.0,
            fov_half: 30f64.to_radians(),
            background: colors::BACKGROUND,
            backface_culling: true,
            interpolation: Interpolation::default(),
            supersample: 1,
            span_early_exit: true,
        }
    }
}

impl RenderConfig {
    /// Width / height of the output image.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Size of the buffer the rasterizer actually draws into. Saturates for
    /// configurations `validate` rejects.
    pub fn internal_size(&self) -> (u32, u32) {
        (
            self.width.saturating_mul(self.supersample),
            self.height.saturating_mul(self.supersample),
        )
    }

    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), RenderError> {
        validate_dimensions(self.width, self.height)?;
        validate_clip_range(self.near, self.far)?;
        validate_fov_half(self.fov_half)?;
        if !(1..=MAX_SUPERSAMPLE).contains(&self.supersample) {
            return Err(RenderError::InvalidSupersample(self.supersample));
        }
        // The supersampled buffer must stay addressable
        let scaled = |side: u32| side.checked_mul(self.supersample);
        if scaled(self.width).zip(scaled(self.height)).is_none() {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    Ok(())
}

pub(crate) fn validate_clip_range(near: f64, far: f64) -> Result<(), RenderError> {
    // Written so that NaN fails as well
    if !(near > 0.0 && far > near && far.is_finite()) {
        return Err(RenderError::InvalidClipRange { near, far });
    }
    Ok(())
}

pub(crate) fn validate_fov_half(fov_half: f64) -> Result<(), RenderError> {
    if !(fov_half > 0.0 && fov_half < std::f64::consts::FRAC_PI_2) {
        return Err(RenderError::InvalidFieldOfView(fov_half));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_width() {
        let config = RenderConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RenderError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn rejects_inverted_clip_range() {
        let config = RenderConfig {
            near: 10.0,
            far: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RenderError::InvalidClipRange { .. })
        ));
    }

    #[test]
    fn rejects_nan_fov() {
        let config = RenderConfig {
            fov_half: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RenderError::InvalidFieldOfView(_))
        ));
    }

    #[test]
    fn rejects_large_supersample() {
        let config = RenderConfig {
            supersample: 8,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RenderError::InvalidSupersample(8))
        ));
    }

    #[test]
    fn rejects_supersampled_size_overflow() {
        let config = RenderConfig {
            width: u32::MAX / 2,
            supersample: 4,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RenderError::InvalidDimensions { width, .. }) if width == u32::MAX / 2
        ));
        assert_eq!(config.internal_size().0, u32::MAX);
    }

    #[test]
    fn internal_size_scales_with_supersample() {
        let config = RenderConfig {
            width: 100,
            height: 50,
            supersample: 2,
            ..Default::default()
        };
        assert_eq!(config.internal_size(), (200, 100));
    }
}
