//! 4D vector for homogeneous coordinates.

use std::ops::{Add, Mul, Sub};

use super::mat4::Mat4;
use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vec4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create a Vec4 from a Vec3 with specified w component.
    pub const fn from_vec3(v: Vec3, w: f64) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Convert to Vec3, discarding w.
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Divide x, y, z by w.
    ///
    /// `w == 1` is passed through untouched. `w == 0` has no finite image and
    /// yields `None`, as does any non-finite result.
    pub fn perspective_divide(self) -> Option<Vec3> {
        if self.w == 1.0 {
            return Some(self.to_vec3());
        }
        if self.w == 0.0 {
            return None;
        }
        let inv_w = 1.0 / self.w;
        let v = Vec3::new(self.x * inv_w, self.y * inv_w, self.z * inv_w);
        v.is_finite().then_some(v)
    }

    /// Linearly interpolate between two vectors.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Add<Vec4> for Vec4 {
    type Output = Vec4;

    fn add(self, rhs: Vec4) -> Self::Output {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl Sub<Vec4> for Vec4 {
    type Output = Vec4;

    fn sub(self, rhs: Vec4) -> Self::Output {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

impl Mul<f64> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

/// Row vector times matrix: `v * M`.
impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    fn mul(self, m: Mat4) -> Self::Output {
        let column = |c: usize| {
            self.x * m.get(0, c) + self.y * m.get(1, c) + self.z * m.get(2, c) + self.w * m.get(3, c)
        };
        Self::new(column(0), column(1), column(2), column(3))
    }
}

impl From<Vec3> for Vec4 {
    /// Convert Vec3 to Vec4 as a point (w=1).
    fn from(v: Vec3) -> Self {
        Self::from_vec3(v, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_by_zero_w_is_rejected() {
        assert_eq!(Vec4::new(1.0, 2.0, 3.0, 0.0).perspective_divide(), None);
    }

    #[test]
    fn divide_by_unit_w_is_identity() {
        let v = Vec4::new(0.1, 0.2, 0.3, 1.0);
        assert_eq!(v.perspective_divide(), Some(Vec3::new(0.1, 0.2, 0.3)));
    }

    #[test]
    fn divide_scales_by_inverse_w() {
        let v = Vec4::new(2.0, 4.0, -6.0, 2.0);
        assert_eq!(v.perspective_divide(), Some(Vec3::new(1.0, 2.0, -3.0)));
    }
}
