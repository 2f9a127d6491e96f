//! Transform component for mesh instances.
//!
//! Provides a [`Transform`] with a fluent API for position, rotation
//! (Euler angles), and per-axis scale, and derives the model matrix.

use tracing::warn;

use crate::math::mat3::Mat3;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::error::MathError;

/// Position, Euler rotation, and scale of a mesh instance.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```
/// # use softpipe::Transform;
/// let mut transform = Transform::new();
/// transform
///     .set_position_xyz(5.0, 2.0, 0.0)
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
    /// Identity transform: position 0, rotation 0, scale 1.
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

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    // ============ Rotation ============

    /// Euler angles in radians.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotation.x += angle;
        self
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
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

    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    // ============ Matrix Generation ============

    /// Model matrix: `T * Rz * Ry * Rx * S`.
    ///
    /// Column-vector convention, so scale applies first, then the Euler
    /// rotations in Z-Y-X order, then translation.
    pub fn matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * self.rotation_scale()
    }

    /// Transform a point through the model matrix, including the
    /// perspective divide.
    pub fn transform_point(&self, p: Vec3) -> Result<Vec3, MathError> {
        self.matrix().transform_point(p)
    }

    /// Normal matrix: inverse-transpose of the rotation-scale block.
    ///
    /// Handles non-uniform scale correctly. When the block is singular
    /// (a zero scale axis) the uninverted block is returned so the frame can
    /// still complete.
    pub fn normal_matrix(&self) -> Mat3 {
        let rotation_scale = self.rotation_scale();
        match rotation_scale.inverse() {
            Some(inv) => inv.transpose().upper_left(),
            None => {
                warn!("singular rotation-scale matrix; normals use the uninverted transform");
                rotation_scale.upper_left()
            }
        }
    }

    fn rotation_scale(&self) -> Mat4 {
        Mat4::rotation_z(self.rotation.z)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }
}
