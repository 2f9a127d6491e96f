//! Perspective projection parameters.
//!
//! [`Projection`] is the single source of truth for FOV, aspect ratio, and
//! the near/far planes. Parameters are validated on construction, so matrix
//! generation is infallible.

use crate::error::MathError;
use crate::math::mat4::Mat4;

/// Validated perspective projection parameters.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Full vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    /// Near clipping plane distance.
    z_near: f32,
    /// Far clipping plane distance.
    z_far: f32,
}

impl Projection {
    /// Creates a new projection.
    ///
    /// Rejects `fov_y` outside (0, π), non-positive `aspect_ratio` or
    /// `z_near`, and `z_far <= z_near` with [`MathError::InvalidArgument`].
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Result<Self, MathError> {
        // Reuse the matrix constructor's validation so the rules stay in one place.
        Mat4::perspective(fov_y, aspect_ratio, z_near, z_far)?;
        Ok(Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        })
    }

    /// Creates a projection from a field of view in degrees.
    pub fn from_degrees(
        fov_y_degrees: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    ) -> Result<Self, MathError> {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Horizontal field of view, derived from the vertical FOV and aspect.
    pub fn fov_x(&self) -> f32 {
        2.0 * (self.aspect_ratio * (self.fov_y / 2.0).tan()).atan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Updates the aspect ratio (typically on surface resize).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) -> Result<(), MathError> {
        if !(aspect_ratio > 0.0) {
            return Err(MathError::InvalidArgument("aspect ratio must be positive"));
        }
        self.aspect_ratio = aspect_ratio;
        Ok(())
    }

    /// The right-handed perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        // Parameters were validated in `new`, so this cannot fail.
        Mat4::perspective(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
            .unwrap_or_else(|_| Mat4::identity())
    }
}
