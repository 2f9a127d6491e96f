//! In-memory mesh representation.
//!
//! A [`Mesh`] holds shared vertex / texture-coordinate / normal arrays and a
//! list of [`Polygon`]s indexing into them. Polygons may have any vertex
//! count; the `meshops` module triangulates them before rendering.

use crate::error::{MathError, RenderError};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// A polygon as three parallel index lists into the mesh arrays.
///
/// The uv and normal lists may be empty (no texture / no normal data); when
/// non-empty they must be the same length as the vertex list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polygon {
    pub vertices: Vec<usize>,
    pub uvs: Vec<usize>,
    pub normals: Vec<usize>,
}

impl Polygon {
    /// Creates a polygon, validating the parallel-list invariant.
    pub fn new(
        vertices: Vec<usize>,
        uvs: Vec<usize>,
        normals: Vec<usize>,
    ) -> Result<Self, MathError> {
        if !uvs.is_empty() && uvs.len() != vertices.len() {
            return Err(MathError::InvalidArgument(
                "uv index list length must match vertex index list",
            ));
        }
        if !normals.is_empty() && normals.len() != vertices.len() {
            return Err(MathError::InvalidArgument(
                "normal index list length must match vertex index list",
            ));
        }
        Ok(Self {
            vertices,
            uvs,
            normals,
        })
    }

    /// A triangle with vertex indices only.
    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        Self {
            vertices: vec![a, b, c],
            uvs: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// A polygon from vertex indices only.
    pub fn from_vertices(vertices: Vec<usize>) -> Self {
        Self {
            vertices,
            uvs: Vec::new(),
            normals: Vec::new(),
        }
    }
}

/// Vertex positions, texture coordinates, normals, and polygons.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub polygons: Vec<Polygon>,
}

impl Mesh {
    pub fn new(
        vertices: Vec<Vec3>,
        uvs: Vec<Vec2>,
        normals: Vec<Vec3>,
        polygons: Vec<Polygon>,
    ) -> Self {
        Self {
            vertices,
            uvs,
            normals,
            polygons,
        }
    }

    /// Checks that every polygon index points inside the parallel arrays.
    pub fn validate(&self) -> Result<(), RenderError> {
        for (i, polygon) in self.polygons.iter().enumerate() {
            let in_range = polygon.vertices.iter().all(|&v| v < self.vertices.len())
                && polygon.uvs.iter().all(|&t| t < self.uvs.len())
                && polygon.normals.iter().all(|&n| n < self.normals.len());
            if !in_range {
                return Err(RenderError::InvalidMesh { polygon: i });
            }
        }
        Ok(())
    }

    /// Number of triangles the polygon list will produce when triangulated.
    pub fn triangle_count(&self) -> usize {
        self.polygons
            .iter()
            .filter(|p| p.vertices.len() >= 3)
            .map(|p| p.vertices.len() - 2)
            .sum()
    }

    /// The canonical 2x2x2 cube centered at the origin: 8 vertices, 6 quad
    /// faces wound counter-clockwise viewed from outside.
    pub fn unit_cube() -> Self {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -1.0), // 0
            Vec3::new(1.0, -1.0, -1.0),  // 1
            Vec3::new(1.0, 1.0, -1.0),   // 2
            Vec3::new(-1.0, 1.0, -1.0),  // 3
            Vec3::new(-1.0, -1.0, 1.0),  // 4
            Vec3::new(1.0, -1.0, 1.0),   // 5
            Vec3::new(1.0, 1.0, 1.0),    // 6
            Vec3::new(-1.0, 1.0, 1.0),   // 7
        ];
        let polygons = vec![
            Polygon::from_vertices(vec![4, 5, 6, 7]), // front (+Z)
            Polygon::from_vertices(vec![1, 0, 3, 2]), // back (−Z)
            Polygon::from_vertices(vec![5, 1, 2, 6]), // right (+X)
            Polygon::from_vertices(vec![0, 4, 7, 3]), // left (−X)
            Polygon::from_vertices(vec![7, 6, 2, 3]), // top (+Y)
            Polygon::from_vertices(vec![0, 1, 5, 4]), // bottom (−Y)
        ];
        Self::new(vertices, Vec::new(), Vec::new(), polygons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_rejects_mismatched_lists() {
        assert!(Polygon::new(vec![0, 1, 2], vec![0, 1], Vec::new()).is_err());
        assert!(Polygon::new(vec![0, 1, 2], Vec::new(), vec![0]).is_err());
        assert!(Polygon::new(vec![0, 1, 2], vec![0, 1, 2], vec![2, 1, 0]).is_ok());
    }

    #[test]
    fn validate_catches_out_of_range_indices() {
        let mut mesh = Mesh::unit_cube();
        assert!(mesh.validate().is_ok());
        mesh.polygons.push(Polygon::triangle(0, 1, 99));
        assert_eq!(
            mesh.validate(),
            Err(RenderError::InvalidMesh { polygon: 6 })
        );
    }

    #[test]
    fn unit_cube_shape() {
        let cube = Mesh::unit_cube();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.polygons.len(), 6);
        assert_eq!(cube.triangle_count(), 12);
    }
}
