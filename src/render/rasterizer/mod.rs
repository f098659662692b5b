//! Triangle rasterization into a depth-tested framebuffer.
//!
//! The [`Rasterizer`] owns the [`FrameBuffer`] and the [`Projection`] that
//! maps camera-space vertices to pixels. Each triangle is projected, scan
//! converted with edge functions and shaded by a [`PixelShader`] chosen from
//! its [`ShadingMode`].

mod edgefunction;
mod shader;

pub use edgefunction::{edge_function, rasterize_with_shader, EdgeStepper, RasterOptions};
pub use shader::{FlatShader, GouraudShader, PixelShader};

use super::framebuffer::FrameBuffer;
use crate::colors::Color;
use crate::config::Interpolation;
use crate::math::Vec3;
use crate::projection::{Projection, RasterVertex};

/// How a triangle gets its color, decided once per facet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShadingMode {
    /// One color for the whole triangle (unlit, or lit once per facet).
    Flat(Color),
    /// Base color scaled by a brightness interpolated from the vertices.
    PerVertex { base: Color, brightness: [f64; 3] },
}

/// A camera-space triangle ready for rasterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec3; 3],
    pub shading: ShadingMode,
}

impl Triangle {
    pub fn new(points: [Vec3; 3], shading: ShadingMode) -> Self {
        Self { points, shading }
    }

    pub fn flat(points: [Vec3; 3], color: Color) -> Self {
        Self::new(points, ShadingMode::Flat(color))
    }
}

/// Draws camera-space triangles into its framebuffer.
pub struct Rasterizer {
    projection: Projection,
    framebuffer: FrameBuffer,
    options: RasterOptions,
}

impl Rasterizer {
    /// Creates a rasterizer with a cleared framebuffer the size of
    /// `projection`.
    pub fn new(projection: Projection, background: Color) -> Self {
        Self {
            framebuffer: FrameBuffer::new(projection.width(), projection.height(), background),
            projection,
            options: RasterOptions::default(),
        }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Replaces the projection. The framebuffer is reallocated (and cleared)
    /// only when the raster size changes.
    pub fn set_projection(&mut self, projection: Projection) {
        if (projection.width(), projection.height())
            != (self.framebuffer.width(), self.framebuffer.height())
        {
            self.framebuffer = FrameBuffer::new(
                projection.width(),
                projection.height(),
                Color::from_argb(self.framebuffer.background()),
            );
        }
        self.projection = projection;
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.framebuffer
    }

    pub fn options(&self) -> RasterOptions {
        self.options
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.options.interpolation = interpolation;
    }

    pub fn set_span_early_exit(&mut self, enabled: bool) {
        self.options.span_early_exit = enabled;
    }

    /// Resets color to the background and depth to `+∞`.
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Projects, scan converts and depth tests one camera-space triangle.
    ///
    /// `shading` carries per-vertex brightness; without it the triangle is
    /// filled with `color` unmodified. Vertices must lie in front of the
    /// camera (run the clipper first); a triangle with any vertex at or
    /// behind the eye is skipped.
    ///
    /// Returns the number of pixels written.
    pub fn raster_triangle(
        &mut self,
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        color: Color,
        shading: Option<[f64; 3]>,
    ) -> usize {
        let mode = match shading {
            Some(brightness) => ShadingMode::PerVertex {
                base: color,
                brightness,
            },
            None => ShadingMode::Flat(color),
        };
        self.draw(&Triangle::new([v0, v1, v2], mode))
    }

    /// Rasterizes a [`Triangle`], selecting the pixel shader from its mode.
    pub fn draw(&mut self, triangle: &Triangle) -> usize {
        let Some(vertices) = self.project(&triangle.points) else {
            return 0;
        };

        match triangle.shading {
            ShadingMode::Flat(color) => {
                if !color.is_finite() {
                    return 0;
                }
                let shader = FlatShader::new(color);
                rasterize_with_shader(vertices, &mut self.framebuffer, &shader, self.options)
            }
            ShadingMode::PerVertex { base, brightness } => {
                if !base.is_finite() {
                    return 0;
                }
                let shader = GouraudShader::new(base, brightness);
                rasterize_with_shader(vertices, &mut self.framebuffer, &shader, self.options)
            }
        }
    }

    fn project(&self, points: &[Vec3; 3]) -> Option<[RasterVertex; 3]> {
        Some([
            self.projection.to_raster(points[0])?,
            self.projection.to_raster(points[1])?,
            self.projection.to_raster(points[2])?,
        ])
    }
}
