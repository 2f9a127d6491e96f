//! 4x4 transformation matrix.
//!
//! # Convention
//! - Stored row-major as `data[row][col]`, **column vectors** on the right:
//!   `Mat4 * Vec4`
//! - Translation lives in the last column
//! - Transforms chain right-to-left: `A * B * v` applies B first, then A
//! - Right-handed coordinate system; the camera looks down −Z

use std::ops::{Add, Mul};

use super::mat3::Mat3;
use super::vec3::Vec3;
use super::vec4::Vec4;
use super::EPSILON;
use crate::error::MathError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn zero() -> Self {
        Mat4::new([[0.0; 4]; 4])
    }

    /// Creates a translation matrix (translation in the last column).
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a per-axis scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation around the X axis (right-handed, angle in radians).
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation around the Y axis (right-handed, angle in radians).
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation around the Z axis (right-handed, angle in radians).
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed symmetric perspective projection.
    ///
    /// `fov_y` is the full vertical field of view in radians. A point at the
    /// near-plane center maps to NDC z = −1, the far plane to z = +1.
    ///
    /// Rejects `fov_y` outside (0, π), non-positive `aspect_ratio` or `near`,
    /// and `far <= near`.
    pub fn perspective(
        fov_y: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, MathError> {
        if !(fov_y > 0.0 && fov_y < std::f32::consts::PI) {
            return Err(MathError::InvalidArgument("fov must be in (0, pi)"));
        }
        if !(aspect_ratio > 0.0) {
            return Err(MathError::InvalidArgument("aspect ratio must be positive"));
        }
        if !(near > 0.0) {
            return Err(MathError::InvalidArgument("near plane must be positive"));
        }
        if !(far > near) {
            return Err(MathError::InvalidArgument("far plane must exceed near"));
        }

        let f = 1.0 / (fov_y / 2.0).tan();
        let a = (far + near) / (near - far);
        let b = 2.0 * far * near / (near - far);
        Ok(Mat4::new([
            [f / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, a, b],
            [0.0, 0.0, -1.0, 0.0],
        ]))
    }

    /// Right-handed look-at view matrix.
    ///
    /// Rotation rows are the camera basis (right / up / −forward); the last
    /// column holds the negated dot products with `eye`. Fails with
    /// [`MathError::InvalidArgument`] when `eye` coincides with `target` or
    /// `up` is parallel to the view direction.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Result<Self, MathError> {
        let forward = (target - eye)
            .normalize()
            .map_err(|_| MathError::InvalidArgument("look-at eye coincides with target"))?;
        let right = forward
            .cross(up)
            .normalize()
            .map_err(|_| MathError::InvalidArgument("look-at up is parallel to view direction"))?;
        let cam_up = right.cross(forward).normalize_or_zero();

        Ok(Self::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [cam_up.x, cam_up.y, cam_up.z, -cam_up.dot(eye)],
            [-forward.x, -forward.y, -forward.z, forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }

    /// Access element at [row][col] with bounds checking.
    pub fn get(&self, row: usize, col: usize) -> Result<f32, MathError> {
        if row >= 4 || col >= 4 {
            return Err(MathError::IndexOutOfBounds { row, col });
        }
        Ok(self.data[row][col])
    }

    /// Set element at [row][col] with bounds checking.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), MathError> {
        if row >= 4 || col >= 4 {
            return Err(MathError::IndexOutOfBounds { row, col });
        }
        self.data[row][col] = value;
        Ok(())
    }

    pub fn transpose(&self) -> Self {
        let m = &self.data;
        Mat4::new([
            [m[0][0], m[1][0], m[2][0], m[3][0]],
            [m[0][1], m[1][1], m[2][1], m[3][1]],
            [m[0][2], m[1][2], m[2][2], m[3][2]],
            [m[0][3], m[1][3], m[2][3], m[3][3]],
        ])
    }

    /// The 3x3 minor obtained by deleting `row` and `col`.
    fn minor(&self, row: usize, col: usize) -> Mat3 {
        let mut out = [[0.0f32; 3]; 3];
        let mut r_out = 0;
        for r in 0..4 {
            if r == row {
                continue;
            }
            let mut c_out = 0;
            for c in 0..4 {
                if c == col {
                    continue;
                }
                out[r_out][c_out] = self.data[r][c];
                c_out += 1;
            }
            r_out += 1;
        }
        Mat3::new(out)
    }

    /// The signed cofactor for element [row][col].
    fn cofactor(&self, row: usize, col: usize) -> f32 {
        let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(row, col).determinant()
    }

    /// Determinant by Laplace expansion along the first row.
    ///
    /// Each term recurses into a 3x3 cofactor determinant; fine at this
    /// fixed size.
    pub fn determinant(&self) -> f32 {
        (0..4).map(|col| self.data[0][col] * self.cofactor(0, col)).sum()
    }

    /// Inverse via the adjugate over the determinant.
    ///
    /// Returns `None` when |determinant| is below epsilon so callers can
    /// choose how to degrade (the normal-matrix path falls back to the
    /// uninverted matrix).
    pub fn inverse(&self) -> Option<Mat4> {
        let det = self.determinant();
        if det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        // Adjugate: transpose of the cofactor matrix
        let mut out = [[0.0f32; 4]; 4];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, v) in out_row.iter_mut().enumerate() {
                *v = self.cofactor(col, row) * inv_det;
            }
        }
        Some(Mat4::new(out))
    }

    /// The upper-left 3x3 block (rotation and scale).
    pub fn upper_left(&self) -> Mat3 {
        let m = &self.data;
        Mat3::new([
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        ])
    }

    /// Transform a point: extend to w=1, multiply, divide by w.
    ///
    /// Fails with [`MathError::DivideByZero`] when the resulting |w| is
    /// below epsilon.
    pub fn transform_point(&self, p: Vec3) -> Result<Vec3, MathError> {
        (*self * p.extend(1.0)).project()
    }
}

/// Component-wise matrix addition.
impl Add<Mat4> for Mat4 {
    type Output = Mat4;

    fn add(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];
        for (row, out) in result.iter_mut().enumerate() {
            for (col, v) in out.iter_mut().enumerate() {
                *v = self.data[row][col] + rhs.data[row][col];
            }
        }
        Mat4::new(result)
    }
}

/// Matrix multiplication: `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];
        for (row, out) in result.iter_mut().enumerate() {
            for (col, v) in out.iter_mut().enumerate() {
                *v = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }
        Mat4::new(result)
    }
}

/// Transform a Vec4 by the matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        Vec4::new(
            self.data[0][0] * v.x
                + self.data[0][1] * v.y
                + self.data[0][2] * v.z
                + self.data[0][3] * v.w,
            self.data[1][0] * v.x
                + self.data[1][1] * v.y
                + self.data[1][2] * v.z
                + self.data[1][3] * v.w,
            self.data[2][0] * v.x
                + self.data[2][1] * v.y
                + self.data[2][2] * v.z
                + self.data[2][3] * v.w,
            self.data[3][0] * v.x
                + self.data[3][1] * v.y
                + self.data[3][2] * v.z
                + self.data[3][3] * v.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn assert_mat_eq(a: Mat4, b: Mat4, epsilon: f32) {
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(
                    a.get(row, col).unwrap(),
                    b.get(row, col).unwrap(),
                    epsilon = epsilon
                );
            }
        }
    }

    #[test]
    fn inverse_times_self_is_identity() {
        let m = Mat4::translation(1.0, -2.0, 3.0)
            * Mat4::rotation_y(0.7)
            * Mat4::rotation_x(-0.3)
            * Mat4::scaling(2.0, 1.0, 0.5);
        let inv = m.inverse().unwrap();
        assert_mat_eq(m * inv, Mat4::identity(), 1e-5);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Mat4::zero().inverse().is_none());
        assert!(Mat4::scaling(1.0, 0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn determinant_of_scale_is_product() {
        let m = Mat4::scaling(2.0, 3.0, 4.0);
        assert_relative_eq!(m.determinant(), 24.0, epsilon = 1e-4);
    }

    #[test]
    fn rotation_x_quarter_turn() {
        // +Y rotates to +Z under a right-handed quarter turn around X
        let v = Mat4::rotation_x(FRAC_PI_2) * Vec4::direction(0.0, 1.0, 0.0);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let t = Mat4::translation(1.0, 2.0, 3.0);
        let p = t * Vec4::point(0.0, 0.0, 0.0);
        let d = t * Vec4::direction(0.0, 0.0, 1.0);
        assert_eq!(p.truncate(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(d.truncate(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn look_at_maps_origin_behind_camera() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP).unwrap();
        let origin = view.transform_point(Vec3::ZERO).unwrap();
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.z, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn look_at_degenerate_fails() {
        let eye = Vec3::new(1.0, 1.0, 1.0);
        assert!(Mat4::look_at(eye, eye, Vec3::UP).is_err());
        // Up parallel to the view direction
        assert!(Mat4::look_at(Vec3::ZERO, Vec3::UP, Vec3::UP).is_err());
    }

    #[test]
    fn perspective_near_plane_maps_to_minus_one() {
        let proj = Mat4::perspective(FRAC_PI_2, 1.0, 1.0, 100.0).unwrap();
        let near_center = proj.transform_point(Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert_relative_eq!(near_center.z, -1.0, epsilon = 1e-5);
        let far_center = proj.transform_point(Vec3::new(0.0, 0.0, -100.0)).unwrap();
        assert_relative_eq!(far_center.z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn perspective_rejects_bad_parameters() {
        assert!(Mat4::perspective(0.0, 1.0, 1.0, 100.0).is_err());
        assert!(Mat4::perspective(FRAC_PI_4, 0.0, 1.0, 100.0).is_err());
        assert!(Mat4::perspective(FRAC_PI_4, 1.0, 0.0, 100.0).is_err());
        assert!(Mat4::perspective(FRAC_PI_4, 1.0, 10.0, 10.0).is_err());
        assert!(Mat4::perspective(FRAC_PI_4, 1.0, 10.0, 1.0).is_err());
    }

    #[test]
    fn transform_point_zero_w_fails() {
        // Bottom row zeroes out w for any point
        let mut m = Mat4::identity();
        m.set(3, 0, 0.0).unwrap();
        m.set(3, 3, 0.0).unwrap();
        assert_eq!(
            m.transform_point(Vec3::new(1.0, 2.0, 3.0)),
            Err(MathError::DivideByZero)
        );
    }

    #[test]
    fn addition_is_component_wise() {
        let sum = Mat4::identity() + Mat4::identity();
        assert_relative_eq!(sum.get(0, 0).unwrap(), 2.0);
        assert_relative_eq!(sum.get(0, 1).unwrap(), 0.0);
    }
}
