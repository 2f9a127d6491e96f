use std::ops::{Add, Mul, Neg, Sub};

use super::EPSILON;
use crate::error::MathError;

/// 2D vector, used for texture coordinates and screen-plane math.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// The z-component of the 3D cross product of two 2D vectors.
    ///
    /// Positive when `other` is counter-clockwise from `self`.
    pub fn perp_dot(&self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn normalize(&self) -> Result<Self, MathError> {
        let mag = self.magnitude();
        if mag < EPSILON {
            return Err(MathError::DivideByZero);
        }
        Ok(Self::new(self.x / mag, self.y / mag))
    }

    /// Divide by a scalar, failing on a zero divisor.
    pub fn checked_div(&self, scalar: f32) -> Result<Self, MathError> {
        if scalar.abs() < EPSILON {
            return Err(MathError::DivideByZero);
        }
        Ok(Self::new(self.x / scalar, self.y / scalar))
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vec2> for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}
