//! Transform component for 3D objects.
//!
//! Provides a [`Transform`] struct with a fluent API for managing position,
//! rotation (Euler angles), and scale.

use crate::math::{Mat4, Vec3};

/// A 3D transform with position, rotation (Euler angles), and scale.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(0.0, 0.0, -6.0)
///     .rotate_y(0.1)
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3, // Euler angles in radians: x=pitch, y=yaw, z=roll
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (position=0, rotation=0, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_position_xyz(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    // ============ Rotation ============

    /// Get the rotation (Euler angles in radians).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Add a delta rotation (Euler angles in radians).
    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation = self.rotation + delta;
        self
    }

    /// Rotate around the X axis (pitch).
    pub fn rotate_x(&mut self, angle: f64) -> &mut Self {
        self.rotation.x += angle;
        self
    }

    /// Rotate around the Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f64) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    /// Rotate around the Z axis (roll).
    pub fn rotate_z(&mut self, angle: f64) -> &mut Self {
        self.rotation.z += angle;
        self
    }

    // ============ Scale ============

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f64) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    // ============ Matrix Generation ============

    fn linear_part(&self) -> Mat4 {
        Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_z(self.rotation.z)
    }

    /// Generate the transformation matrix.
    ///
    /// Order: Scale * RotationX * RotationY * RotationZ * Translation
    /// (row vectors: scale applied first, then rotations, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        self.linear_part() * Mat4::translation(self.position.x, self.position.y, self.position.z)
    }

    /// Generate the normal matrix for lighting calculations.
    ///
    /// This is the inverse transpose of the rotation+scale matrix (excludes translation).
    /// Correctly handles non-uniform scaling.
    pub fn normal_matrix(&self) -> Mat4 {
        self.linear_part()
            .inverse()
            .unwrap_or(Mat4::identity())
            .transpose()
    }

    /// Model → camera space for a point.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        point.transform(&self.to_matrix())
    }
}
