//! Error types for the rendering pipeline.

use thiserror::Error;

/// Errors raised by the math layer.
///
/// These are raised eagerly at the call that detects them. Singular matrix
/// inversion is deliberately *not* in this list: it is reported through
/// [`Option`](crate::math::mat4::Mat4::inverse) so callers can degrade
/// instead of aborting the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// A parameter was outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Normalizing a zero-length vector, dividing by a zero scalar, or
    /// projecting a homogeneous point with |w| below epsilon.
    #[error("division by zero")]
    DivideByZero,

    /// Matrix element access outside the fixed dimensions.
    #[error("index out of bounds: ({row}, {col})")]
    IndexOutOfBounds { row: usize, col: usize },
}

/// Errors raised while rendering a frame.
///
/// A failed frame aborts cleanly: the surface is left cleared (or with the
/// previous frame's content if the failure happened before the clear), never
/// partially rasterized without signaling the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Math(#[from] MathError),

    /// The mesh references a vertex, uv, or normal index outside its arrays.
    #[error("mesh index out of range in polygon {polygon}")]
    InvalidMesh { polygon: usize },

    /// A material referenced a texture the cache does not hold.
    #[error("texture not loaded: {}", .0.display())]
    MissingTexture(std::path::PathBuf),
}
