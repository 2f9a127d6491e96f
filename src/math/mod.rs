//! Linear algebra value types for the rendering pipeline.
//!
//! All types are small `Copy` values; arithmetic returns new instances.
//! Float comparisons throughout the crate use [`EPSILON`] rather than exact
//! equality.

pub mod mat3;
pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use mat3::Mat3;
pub use mat4::Mat4;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;

/// Comparison epsilon for single-precision pipeline math.
pub const EPSILON: f32 = 1e-6;
