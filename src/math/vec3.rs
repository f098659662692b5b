use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};

use super::mat4::Mat4;

/// A point or direction in 3D space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    /// The direction the camera looks in (-Z).
    pub const FORWARD: Self = Self::new(0.0, 0.0, -1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// Returns the unit vector in the same direction, or `None` for a zero
    /// (or non-finite) vector.
    pub fn try_normalize(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude > 0.0 && magnitude.is_finite() {
            Some(*self / magnitude)
        } else {
            None
        }
    }

    /// Unit vector in the same direction. A zero vector stays zero.
    pub fn normalize(&self) -> Self {
        self.try_normalize().unwrap_or(Self::ZERO)
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Component-wise product.
    pub fn mul_elem(&self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Affine transform: treats `self` as a point with `w = 1` and ignores the
    /// projective column of `m`.
    pub fn transform(&self, m: &Mat4) -> Self {
        Self::new(
            self.x * m.get(0, 0) + self.y * m.get(1, 0) + self.z * m.get(2, 0) + m.get(3, 0),
            self.x * m.get(0, 1) + self.y * m.get(1, 1) + self.z * m.get(2, 1) + m.get(3, 1),
            self.x * m.get(0, 2) + self.y * m.get(1, 2) + self.z * m.get(2, 2) + m.get(3, 2),
        )
    }

    /// Transforms a direction (no translation).
    pub fn transform_direction(&self, m: &Mat4) -> Self {
        Self::new(
            self.x * m.get(0, 0) + self.y * m.get(1, 0) + self.z * m.get(2, 0),
            self.x * m.get(0, 1) + self.y * m.get(1, 1) + self.z * m.get(2, 1),
            self.x * m.get(0, 2) + self.y * m.get(1, 2) + self.z * m.get(2, 2),
        )
    }

    /// Projective transform followed by the perspective divide.
    ///
    /// The divide is skipped when `w` is exactly 1 so that affine matrices
    /// give bit-identical results to [`Vec3::transform`]. Returns `None` when
    /// `w` is zero.
    pub fn project(&self, m: &Mat4) -> Option<Self> {
        (*self * *m).perspective_divide()
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Homogeneous transform of a point (`w = 1`), without the divide.
impl Mul<Mat4> for Vec3 {
    type Output = super::vec4::Vec4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        super::vec4::Vec4::from_vec3(self, 1.0) * rhs
    }
}

impl Div<f64> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl AbsDiffEq for Vec3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vec3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
