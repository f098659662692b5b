//! Perspective projection and the camera → raster mapping.
//!
//! The [`Projection`] struct is the single source of truth for the projection
//! parameters (near/far, half field of view, raster size). It owns the
//! projection matrix and its inverse and derives the view frustum used by the
//! clipper.

use crate::clipper::Frustum;
use crate::config::{validate_clip_range, validate_dimensions, validate_fov_half};
use crate::error::RenderError;
use crate::math::{Mat4, Vec3, Vec4};

/// Builds the perspective matrix for a camera looking down -Z.
///
/// `fov_half` is half of the horizontal field of view in radians; the half
/// width of the view window on the near plane is `near * tan(fov_half)` and the
/// half height is that divided by `aspect`.
pub fn build_projection(near: f64, far: f64, fov_half: f64, aspect: f64) -> Mat4 {
    let right = near * fov_half.tan();
    let top = right / aspect;
    Mat4::perspective(near, far, right, top)
}

/// A vertex after projection into pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterVertex {
    /// Pixel column, origin at the left edge.
    pub x: f64,
    /// Pixel row, origin at the top edge.
    pub y: f64,
    /// Normalized device depth in `[-1, 1]` (linear in `1/z`).
    pub ndc_z: f64,
    /// Camera-space distance along the view axis (`-z`, equal to clip `w`).
    pub depth: f64,
    /// `1 / depth`, linear in raster space.
    pub inv_depth: f64,
}

/// Perspective projection parameters for one raster size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    near: f64,
    far: f64,
    fov_half: f64,
    width: u32,
    height: u32,
    matrix: Mat4,
    inverse: Mat4,
}

impl Projection {
    /// Creates a projection for a `width` × `height` raster.
    ///
    /// # Arguments
    /// * `near` - Near clip distance (must be > 0)
    /// * `far` - Far clip distance (must be > near)
    /// * `fov_half` - Half horizontal field of view in radians, in `(0, π/2)`
    pub fn new(
        near: f64,
        far: f64,
        fov_half: f64,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        validate_clip_range(near, far)?;
        validate_fov_half(fov_half)?;
        validate_dimensions(width, height)?;

        let matrix = build_projection(near, far, fov_half, width as f64 / height as f64);
        let inverse = matrix.inverse().ok_or(RenderError::SingularProjection)?;
        Ok(Self {
            near,
            far,
            fov_half,
            width,
            height,
            matrix,
            inverse,
        })
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(
        near: f64,
        far: f64,
        fov_half_degrees: f64,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        Self::new(near, far, fov_half_degrees.to_radians(), width, height)
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn far(&self) -> f64 {
        self.far
    }

    pub fn fov_half(&self) -> f64 {
        self.fov_half
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Half width of the view window on the near plane.
    pub fn right(&self) -> f64 {
        self.near * self.fov_half.tan()
    }

    /// Half height of the view window on the near plane.
    pub fn top(&self) -> f64 {
        self.right() / self.aspect_ratio()
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Same parameters, different raster size.
    pub fn with_size(&self, width: u32, height: u32) -> Result<Self, RenderError> {
        Self::new(self.near, self.far, self.fov_half, width, height)
    }

    /// Builds the six inward-facing clip planes matching this projection.
    pub fn frustum(&self) -> Frustum {
        Frustum::new(self.near, self.far, self.right(), self.top())
    }

    /// Camera space → homogeneous clip space.
    pub fn to_clip(&self, point: Vec3) -> Vec4 {
        point * self.matrix
    }

    /// Camera space → raster space.
    ///
    /// Returns `None` for points on or behind the camera plane (`w <= 0`),
    /// which the frustum clipper removes before this is called.
    pub fn to_raster(&self, point: Vec3) -> Option<RasterVertex> {
        let clip = self.to_clip(point);
        if !(clip.w > 0.0) {
            return None;
        }
        let ndc = clip.perspective_divide()?;
        let x = (ndc.x + 1.0) * 0.5 * self.width as f64;
        let y = (1.0 - ndc.y) * 0.5 * self.height as f64;
        Some(RasterVertex {
            x,
            y,
            ndc_z: ndc.z,
            depth: clip.w,
            inv_depth: 1.0 / clip.w,
        })
    }

    /// Raster space → camera space, the inverse of [`Projection::to_raster`].
    pub fn unproject(&self, vertex: &RasterVertex) -> Option<Vec3> {
        let ndc_x = vertex.x / self.width as f64 * 2.0 - 1.0;
        let ndc_y = 1.0 - vertex.y / self.height as f64 * 2.0;
        let w = vertex.depth;
        let clip = Vec4::new(ndc_x * w, ndc_y * w, vertex.ndc_z * w, w);
        (clip * self.inverse).perspective_divide()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    fn square_projection() -> Projection {
        Projection::new(1.0, 100.0, FRAC_PI_4, 100, 100).unwrap()
    }

    #[test]
    fn right_and_top_follow_aspect_ratio() {
        let proj = Projection::new(2.0, 10.0, FRAC_PI_4, 200, 100).unwrap();
        assert_relative_eq!(proj.right(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(proj.top(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn from_degrees_converts_correctly() {
        let proj = Projection::from_degrees(1.0, 100.0, 45.0, 100, 100).unwrap();
        assert_relative_eq!(proj.fov_half(), FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(Projection::new(0.0, 10.0, FRAC_PI_4, 10, 10).is_err());
        assert!(Projection::new(1.0, 10.0, 2.0, 10, 10).is_err());
        assert!(Projection::new(1.0, 10.0, FRAC_PI_4, 10, 0).is_err());
    }

    #[test]
    fn axis_point_lands_in_raster_center() {
        let raster = square_projection().to_raster(Vec3::new(0.0, 0.0, -5.0)).unwrap();
        assert_relative_eq!(raster.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(raster.y, 50.0, epsilon = 1e-9);
        assert_relative_eq!(raster.depth, 5.0, epsilon = 1e-12);
        assert_relative_eq!(raster.inv_depth, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn y_axis_is_flipped() {
        let raster = square_projection().to_raster(Vec3::new(0.0, 1.0, -5.0)).unwrap();
        assert!(raster.y < 50.0);
    }

    #[test]
    fn frustum_corners_map_to_raster_corners() {
        let proj = square_projection();
        // fov_half = 45 degrees, so at distance 5 the window spans [-5, 5]
        let top_left = proj.to_raster(Vec3::new(-5.0, 5.0, -5.0)).unwrap();
        let bottom_right = proj.to_raster(Vec3::new(5.0, -5.0, -5.0)).unwrap();
        assert_relative_eq!(top_left.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(top_left.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(bottom_right.x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(bottom_right.y, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn ndc_depth_spans_near_to_far() {
        let proj = square_projection();
        let near = proj.to_raster(Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let far = proj.to_raster(Vec3::new(0.0, 0.0, -100.0)).unwrap();
        assert_relative_eq!(near.ndc_z, -1.0, epsilon = 1e-12);
        assert_relative_eq!(far.ndc_z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let proj = square_projection();
        assert!(proj.to_raster(Vec3::new(0.0, 0.0, 1.0)).is_none());
        assert!(proj.to_raster(Vec3::ZERO).is_none());
    }

    #[test]
    fn raster_round_trip_recovers_camera_point() {
        let proj = Projection::new(0.5, 200.0, 0.6, 640, 480).unwrap();
        let frustum = proj.frustum();
        let points = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.3, -0.2, -0.9),
            Vec3::new(-12.0, 7.0, -40.0),
            Vec3::new(50.0, -30.0, -150.0),
            Vec3::new(0.01, 0.02, -199.0),
        ];
        for point in points {
            assert!(frustum.contains(point), "{point:?} should be inside");
            let raster = proj.to_raster(point).unwrap();
            let back = proj.unproject(&raster).unwrap();
            assert_relative_eq!(back, point, epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}
