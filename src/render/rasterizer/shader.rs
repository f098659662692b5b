//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer handles:
//! - Bounding box computation
//! - Edge function evaluation
//! - Inside/outside testing
//! - Depth interpolation and testing
//!
//! The shader turns the interpolation weights of a covered pixel into its
//! final packed color.

use crate::colors::Color;

/// Trait for per-pixel shading computations.
///
/// The rasterizer calls `shade()` for each pixel inside the triangle,
/// providing the weights to interpolate per-vertex attributes with. In
/// perspective-correct mode these are already corrected for depth, so
/// `attr = w₀*attr₀ + w₁*attr₁ + w₂*attr₂` is right in camera space.
pub trait PixelShader {
    /// Compute the color for a pixel, or `None` to discard it.
    ///
    /// # Arguments
    /// * `weights` - Interpolation weights [w₀, w₁, w₂] that sum to 1.0
    fn shade(&self, weights: [f64; 3]) -> Option<u32>;
}

/// Flat shader - returns a constant color for all pixels.
///
/// Used for facets shaded once from the facet normal, or not lit at all.
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: Color) -> Self {
        Self {
            color: color.to_argb(),
        }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _weights: [f64; 3]) -> Option<u32> {
        Some(self.color)
    }
}

/// Gouraud shader - interpolates per-vertex brightness across the triangle.
///
/// Brightness is computed per vertex from the vertex normals, interpolated
/// here, and applied to the base color with [`Color::shaded`].
pub struct GouraudShader {
    base: Color,
    brightness: [f64; 3],
}

impl GouraudShader {
    pub fn new(base: Color, brightness: [f64; 3]) -> Self {
        Self { base, brightness }
    }
}

impl PixelShader for GouraudShader {
    #[inline]
    fn shade(&self, weights: [f64; 3]) -> Option<u32> {
        let brightness = weights[0] * self.brightness[0]
            + weights[1] * self.brightness[1]
            + weights[2] * self.brightness[2];
        if !brightness.is_finite() {
            return None;
        }
        let color = self.base.shaded(brightness);
        color.is_finite().then(|| color.to_argb())
    }
}
