//! 4x4 transformation matrix using the row-vector convention.
//!
//! # Convention
//! - Vectors are **row vectors** on the left: `Vec * Mat4`
//! - Translation is stored in **row 3**
//! - Transforms chain **left-to-right**: `v * A * B` applies A first, then B
//!
//! # Example
//! ```ignore
//! let model = Mat4::scaling(2.0, 2.0, 2.0) * Mat4::translation(0.0, 0.0, -5.0);
//! let p = vertex.transform(&model); // scaled, then moved
//! ```

use std::ops::Mul;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f64; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix (offset in row 3).
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation about +X (looking down the axis toward the origin).
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed perspective projection for a camera looking down -Z.
    ///
    /// `right` and `top` are the half extents of the view window on the near
    /// plane. After the divide by `w = -z`, x and y land in `[-1, 1]` inside
    /// the frustum and z maps `-near -> -1`, `-far -> 1`, linear in `1/z`.
    pub fn perspective(near: f64, far: f64, right: f64, top: f64) -> Self {
        let depth = far - near;
        Mat4::new([
            [near / right, 0.0, 0.0, 0.0],
            [0.0, near / top, 0.0, 0.0],
            [0.0, 0.0, -(far + near) / depth, -1.0],
            [0.0, 0.0, -2.0 * far * near / depth, 0.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let mut data = [[0.0; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4::new(data)
    }

    /// Determinant of the 3x3 minor left after deleting `row` and `col`.
    fn minor(&self, row: usize, col: usize) -> f64 {
        let mut m = [[0.0; 3]; 3];
        let rows = (0..4).filter(|&r| r != row);
        for (mi, r) in rows.enumerate() {
            let cols = (0..4).filter(|&c| c != col);
            for (mj, c) in cols.enumerate() {
                m[mi][mj] = self.data[r][c];
            }
        }
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    fn cofactor(&self, row: usize, col: usize) -> f64 {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(row, col)
    }

    /// Determinant by cofactor expansion along row 0.
    pub fn determinant(&self) -> f64 {
        (0..4).map(|c| self.data[0][c] * self.cofactor(0, c)).sum()
    }

    /// Computes the inverse of the matrix, if it exists.
    /// Returns `None` if the matrix is singular (determinant is zero).
    pub fn inverse(&self) -> Option<Mat4> {
        let det = self.determinant();
        if det.abs() < f64::EPSILON || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;

        // The inverse is the transpose of the cofactor matrix divided by determinant
        let mut data = [[0.0; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.cofactor(col, row) * inv_det;
            }
        }
        Some(Mat4::new(data))
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// With row vectors, `v * (A * B)` applies A first, then B.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f64; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = (0..4).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }

        Mat4::new(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Vec3;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_mat_eq(a: &Mat4, b: &Mat4) {
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn rotation_y_turns_minus_z_toward_minus_x() {
        let p = Vec3::new(0.0, 0.0, -1.0).transform(&Mat4::rotation_y(FRAC_PI_2));
        assert_relative_eq!(p, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn chain_applies_left_matrix_first() {
        let m = Mat4::scaling(2.0, 2.0, 2.0) * Mat4::translation(1.0, 0.0, 0.0);
        let p = Vec3::new(1.0, 1.0, 1.0).transform(&m);
        assert_relative_eq!(p, Vec3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn determinant_of_scaling_is_product() {
        assert_relative_eq!(Mat4::scaling(2.0, 3.0, 4.0).determinant(), 24.0);
    }

    #[test]
    fn inverse_round_trips() {
        let m = Mat4::rotation_x(0.4) * Mat4::rotation_z(-1.1) * Mat4::translation(3.0, -2.0, 7.0);
        let inv = m.inverse().unwrap();
        assert_mat_eq(&(m * inv), &Mat4::identity());
        assert_mat_eq(&(inv * m), &Mat4::identity());
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Mat4::scaling(1.0, 0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_range() {
        let p = Mat4::perspective(1.0, 100.0, 1.0, 1.0);
        let near = Vec3::new(0.0, 0.0, -1.0).project(&p).unwrap();
        let far = Vec3::new(0.0, 0.0, -100.0).project(&p).unwrap();
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-12);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn transpose_swaps_translation_into_last_column() {
        let t = Mat4::translation(1.0, 2.0, 3.0).transpose();
        assert_eq!(t.get(0, 3), 1.0);
        assert_eq!(t.get(2, 3), 3.0);
        assert_eq!(t.get(3, 0), 0.0);
    }
}
