//! 3x3 matrix, used for normal transformation in the lit pipeline.

use std::ops::{Add, Mul};

use super::vec3::Vec3;
use crate::error::MathError;

/// 3x3 matrix stored as `data[row][col]`, column-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    data: [[f32; 3]; 3],
}

impl Mat3 {
    pub const fn new(data: [[f32; 3]; 3]) -> Self {
        Mat3 { data }
    }

    pub fn identity() -> Self {
        Mat3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn zero() -> Self {
        Mat3::new([[0.0; 3]; 3])
    }

    /// Access element at [row][col] with bounds checking.
    pub fn get(&self, row: usize, col: usize) -> Result<f32, MathError> {
        if row >= 3 || col >= 3 {
            return Err(MathError::IndexOutOfBounds { row, col });
        }
        Ok(self.data[row][col])
    }

    /// Set element at [row][col] with bounds checking.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), MathError> {
        if row >= 3 || col >= 3 {
            return Err(MathError::IndexOutOfBounds { row, col });
        }
        self.data[row][col] = value;
        Ok(())
    }

    pub fn transpose(&self) -> Self {
        let m = &self.data;
        Mat3::new([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        let m = &self.data;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }
}

impl Add<Mat3> for Mat3 {
    type Output = Mat3;

    fn add(self, rhs: Mat3) -> Self::Output {
        let mut result = [[0.0f32; 3]; 3];
        for (row, out) in result.iter_mut().enumerate() {
            for (col, v) in out.iter_mut().enumerate() {
                *v = self.data[row][col] + rhs.data[row][col];
            }
        }
        Mat3::new(result)
    }
}

impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut result = [[0.0f32; 3]; 3];
        for (row, out) in result.iter_mut().enumerate() {
            for (col, v) in out.iter_mut().enumerate() {
                *v = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col];
            }
        }
        Mat3::new(result)
    }
}

/// Transform a Vec3 by the matrix: Mat3 * Vec3 (column vector).
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        Vec3::new(
            self.data[0][0] * v.x + self.data[0][1] * v.y + self.data[0][2] * v.z,
            self.data[1][0] * v.x + self.data[1][1] * v.y + self.data[1][2] * v.z,
            self.data[2][0] * v.x + self.data[2][1] * v.y + self.data[2][2] * v.z,
        )
    }
}
