//! Mesh processing: triangulation and normal recomputation.
//!
//! Both stages run between mesh loading and rendering. Triangulation
//! produces a new mesh with a triangle-only polygon list; normal
//! recalculation mutates a mesh in place, replacing its normal array and
//! rewriting every polygon's normal indices.

mod normals;
mod triangulate;

pub use normals::recalculate_normals;
pub use triangulate::{triangulate, TriangulationStrategy};
