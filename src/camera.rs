//! Look-at camera with an orbit parameterization.
//!
//! # Coordinate System
//!
//! Right-handed: X right, Y up, the camera looks down −Z in its own space.
//!
//! # Representation
//!
//! The canonical state is `position` / `target` / `up`. The orbit
//! parameterization (yaw, pitch, distance around the target) is *derived*:
//! reads compute the spherical values from the canonical vectors, writes
//! recompute `position` atomically. There is no second stored representation
//! that could drift out of sync.

use crate::error::MathError;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::EPSILON;
use crate::projection::Projection;

/// Pitch stays strictly inside (−π/2, π/2) to avoid the gimbal singularity
/// where the view direction aligns with the up vector.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 1e-3;

/// A camera defined by position, target, and up vector.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    projection: Projection,
}

impl Camera {
    /// Creates a camera at `position` looking at `target` with up +Y.
    pub fn new(position: Vec3, target: Vec3, projection: Projection) -> Self {
        Self {
            position,
            target,
            up: Vec3::UP,
            projection,
        }
    }

    // ============ Canonical state ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec3) -> &mut Self {
        self.target = target;
        self
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn set_up(&mut self, up: Vec3) -> &mut Self {
        self.up = up;
        self
    }

    /// Unit vector from the camera toward its target.
    pub fn forward(&self) -> Result<Vec3, MathError> {
        (self.target - self.position)
            .normalize()
            .map_err(|_| MathError::InvalidArgument("camera position coincides with target"))
    }

    // ============ Orbit parameterization (derived) ============

    /// Distance from the target.
    pub fn distance(&self) -> f32 {
        (self.position - self.target).magnitude()
    }

    /// Yaw of the camera around the target's Y axis, in radians.
    ///
    /// Zero yaw puts the camera on the target's +Z side.
    pub fn yaw(&self) -> f32 {
        let offset = self.position - self.target;
        offset.x.atan2(offset.z)
    }

    /// Elevation of the camera above the target's horizontal plane, radians.
    pub fn pitch(&self) -> f32 {
        let offset = self.position - self.target;
        let mag = offset.magnitude();
        if mag < EPSILON {
            0.0
        } else {
            (offset.y / mag).asin()
        }
    }

    /// Re-derives `position` from yaw/pitch/distance in one step.
    ///
    /// Pitch is clamped to (−π/2 + ε, π/2 − ε); distance must be positive.
    pub fn set_orbit(&mut self, yaw: f32, pitch: f32, distance: f32) -> Result<(), MathError> {
        if !(distance > EPSILON) {
            return Err(MathError::InvalidArgument("orbit distance must be positive"));
        }
        let pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let horizontal = distance * pitch.cos();
        self.position = self.target
            + Vec3::new(
                horizontal * yaw.sin(),
                distance * pitch.sin(),
                horizontal * yaw.cos(),
            );
        Ok(())
    }

    /// Rotates the camera around its target by yaw/pitch deltas.
    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32) -> Result<(), MathError> {
        self.set_orbit(
            self.yaw() + yaw_delta,
            self.pitch() + pitch_delta,
            self.distance(),
        )
    }

    /// Moves the camera along its view direction, keeping the target.
    pub fn set_distance(&mut self, distance: f32) -> Result<(), MathError> {
        self.set_orbit(self.yaw(), self.pitch(), distance)
    }

    // ============ Matrices ============

    /// The view matrix, derived on demand (never cached across mutations).
    pub fn view_matrix(&self) -> Result<Mat4, MathError> {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// The projection matrix from the camera's [`Projection`].
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn test_camera(position: Vec3) -> Camera {
        let projection = Projection::new(FRAC_PI_4, 1.0, 0.1, 100.0).unwrap();
        Camera::new(position, Vec3::ZERO, projection)
    }

    #[test]
    fn view_maps_origin_to_minus_distance() {
        let camera = test_camera(Vec3::new(0.0, 0.0, 5.0));
        let view = camera.view_matrix().unwrap();
        let origin = view.transform_point(Vec3::ZERO).unwrap();
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.z, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn degenerate_camera_fails() {
        let camera = test_camera(Vec3::ZERO);
        assert!(camera.view_matrix().is_err());
        assert!(camera.forward().is_err());
    }

    #[test]
    fn orbit_reads_derive_from_position() {
        let camera = test_camera(Vec3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(camera.distance(), 5.0, epsilon = 1e-5);
        assert_relative_eq!(camera.yaw(), 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.pitch(), 0.0, epsilon = 1e-5);

        let elevated = test_camera(Vec3::new(0.0, 3.0, 4.0));
        assert_relative_eq!(elevated.distance(), 5.0, epsilon = 1e-5);
        assert_relative_eq!(elevated.pitch(), (3.0f32 / 5.0).asin(), epsilon = 1e-5);
    }

    #[test]
    fn orbit_write_round_trips() {
        let mut camera = test_camera(Vec3::new(0.0, 0.0, 5.0));
        camera.set_orbit(0.3, 0.4, 7.0).unwrap();
        assert_relative_eq!(camera.yaw(), 0.3, epsilon = 1e-5);
        assert_relative_eq!(camera.pitch(), 0.4, epsilon = 1e-5);
        assert_relative_eq!(camera.distance(), 7.0, epsilon = 1e-5);
        // Target untouched by orbiting
        assert_eq!(camera.target(), Vec3::ZERO);
    }

    #[test]
    fn pitch_is_clamped_short_of_vertical() {
        let mut camera = test_camera(Vec3::new(0.0, 0.0, 5.0));
        camera.set_orbit(0.0, FRAC_PI_2, 5.0).unwrap();
        assert!(camera.pitch() < FRAC_PI_2);
        // Still a valid view: up is not parallel to the view direction
        assert!(camera.view_matrix().is_ok());
    }

    #[test]
    fn orbit_rejects_zero_distance() {
        let mut camera = test_camera(Vec3::new(0.0, 0.0, 5.0));
        assert!(camera.set_orbit(0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn orbit_deltas_accumulate() {
        let mut camera = test_camera(Vec3::new(0.0, 0.0, 5.0));
        camera.orbit(0.1, 0.0).unwrap();
        camera.orbit(0.1, 0.05).unwrap();
        assert_relative_eq!(camera.yaw(), 0.2, epsilon = 1e-4);
        assert_relative_eq!(camera.pitch(), 0.05, epsilon = 1e-4);
    }
}
