//! Smooth per-vertex normal recomputation.

use crate::math::vec3::Vec3;
use crate::mesh::Mesh;

/// Recomputes smooth per-vertex normals for `mesh` in place.
///
/// A scratch accumulator per vertex collects the **unnormalized** face
/// normal `cross(v1 − v0, v2 − v0)` of every triangle touching it (larger
/// faces therefore weigh more), then each accumulator is normalized.
/// Accumulators that stay below epsilon (isolated vertices, cancelling
/// faces) are left at zero. Non-triangle polygons contribute through their
/// fan triangles.
///
/// Afterwards the mesh has exactly one normal per vertex and every
/// polygon's normal-index list mirrors its vertex-index list. Normal
/// identity is thus coupled to vertex identity: triangles sharing a vertex
/// index share a smoothed normal, and vertices duplicated on purpose for
/// hard edges keep separate normals only if the loader split them.
pub fn recalculate_normals(mesh: &mut Mesh) {
    let mut accumulators = vec![Vec3::ZERO; mesh.vertices.len()];

    for polygon in &mesh.polygons {
        let indices = &polygon.vertices;
        if indices.len() < 3 {
            continue;
        }
        for i in 1..indices.len() - 1 {
            let (i0, i1, i2) = (indices[0], indices[i], indices[i + 1]);
            let v0 = mesh.vertices[i0];
            let face = (mesh.vertices[i1] - v0).cross(mesh.vertices[i2] - v0);
            accumulators[i0] = accumulators[i0] + face;
            accumulators[i1] = accumulators[i1] + face;
            accumulators[i2] = accumulators[i2] + face;
        }
    }

    mesh.normals = accumulators
        .into_iter()
        .map(|n| n.normalize_or_zero())
        .collect();
    for polygon in &mut mesh.polygons {
        polygon.normals = polygon.vertices.clone();
    }
}
