//! Polygon triangulation.
//!
//! Converts arbitrary polygons into triangles, propagating texture and
//! normal indices in lockstep with vertex indices. Two strategies:
//!
//! - **Fan**: emits `(0, i, i+1)` — O(n), correct for convex polygons.
//! - **Ear clipping**: repeatedly cuts "ears" (convex corners whose triangle
//!   contains no other remaining vertex) — correct for simple, possibly
//!   concave polygons.
//!
//! The convexity and containment tests run on the polygon projected onto
//! the 2D plane that dominates its own normal (Newell's method), so they
//! hold for polygons in any spatial orientation, not just axis-aligned ones.

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::EPSILON;
use crate::mesh::{Mesh, Polygon};

/// How non-triangle polygons are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriangulationStrategy {
    /// Fan from vertex 0. Fast; assumes convex polygons.
    #[default]
    Fan,
    /// Ear clipping. Handles simple concave polygons.
    EarClipping,
}

/// Triangulates every polygon of `mesh`.
///
/// Returns a new mesh sharing the vertex/uv/normal arrays with a fully
/// triangulated polygon list. An n-gon yields exactly n−2 triangles;
/// triangles pass through unchanged; polygons with fewer than 3 vertices
/// are dropped.
///
/// # Panics
///
/// [`TriangulationStrategy::EarClipping`] reads the vertex positions, so
/// every polygon vertex index must be in range; run [`Mesh::validate`]
/// first on untrusted meshes. ([`TriangulationStrategy::Fan`] rewrites
/// index lists without reading positions and has no such precondition.)
pub fn triangulate(mesh: &Mesh, strategy: TriangulationStrategy) -> Mesh {
    let mut polygons = Vec::with_capacity(mesh.triangle_count());
    for polygon in &mesh.polygons {
        match polygon.vertices.len() {
            0..=2 => {}
            3 => polygons.push(polygon.clone()),
            _ => match strategy {
                TriangulationStrategy::Fan => fan(polygon, &mut polygons),
                TriangulationStrategy::EarClipping => ear_clip(mesh, polygon, &mut polygons),
            },
        }
    }
    Mesh::new(
        mesh.vertices.clone(),
        mesh.uvs.clone(),
        mesh.normals.clone(),
        polygons,
    )
}

/// Builds the triangle using the polygon's corners `a`, `b`, `c`, carrying
/// uv/normal indices alongside the vertex indices when present.
fn corner_triangle(polygon: &Polygon, a: usize, b: usize, c: usize) -> Polygon {
    let pick = |list: &Vec<usize>| {
        if list.is_empty() {
            Vec::new()
        } else {
            vec![list[a], list[b], list[c]]
        }
    };
    Polygon {
        vertices: vec![
            polygon.vertices[a],
            polygon.vertices[b],
            polygon.vertices[c],
        ],
        uvs: pick(&polygon.uvs),
        normals: pick(&polygon.normals),
    }
}

fn fan(polygon: &Polygon, out: &mut Vec<Polygon>) {
    for i in 1..polygon.vertices.len() - 1 {
        out.push(corner_triangle(polygon, 0, i, i + 1));
    }
}

/// Newell's method: robust polygon normal from the projected edge sums.
fn newell_normal(points: &[Vec3]) -> Vec3 {
    let mut normal = Vec3::ZERO;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

/// Projects onto the 2D plane perpendicular to the normal's dominant axis.
fn project_2d(p: Vec3, normal: Vec3) -> Vec2 {
    let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
    if ax >= ay && ax >= az {
        Vec2::new(p.y, p.z)
    } else if ay >= ax && ay >= az {
        Vec2::new(p.z, p.x)
    } else {
        Vec2::new(p.x, p.y)
    }
}

/// Twice the signed area of a 2D polygon (shoelace formula).
fn signed_area(points: &[Vec2]) -> f32 {
    let mut area = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        area += a.perp_dot(b);
    }
    area
}

/// Strict interior test; points on the triangle boundary do not count.
fn strictly_inside(p: Vec2, a: Vec2, b: Vec2, c: Vec2, winding: f32) -> bool {
    let w0 = (b - a).perp_dot(p - a) * winding;
    let w1 = (c - b).perp_dot(p - b) * winding;
    let w2 = (a - c).perp_dot(p - c) * winding;
    w0 > EPSILON && w1 > EPSILON && w2 > EPSILON
}

fn ear_clip(mesh: &Mesh, polygon: &Polygon, out: &mut Vec<Polygon>) {
    let points: Vec<Vec3> = polygon
        .vertices
        .iter()
        .map(|&i| mesh.vertices[i])
        .collect();
    let normal = newell_normal(&points);
    let projected: Vec<Vec2> = points.iter().map(|&p| project_2d(p, normal)).collect();
    let winding = if signed_area(&projected) >= 0.0 { 1.0 } else { -1.0 };

    // Ring of corner positions into the original polygon, shrunk one ear at
    // a time.
    let mut ring: Vec<usize> = (0..polygon.vertices.len()).collect();

    while ring.len() > 3 {
        let mut clipped = false;
        for i in 0..ring.len() {
            let prev = ring[(i + ring.len() - 1) % ring.len()];
            let curr = ring[i];
            let next = ring[(i + 1) % ring.len()];
            let (a, b, c) = (projected[prev], projected[curr], projected[next]);

            let turn = (b - a).perp_dot(c - b) * winding;
            if turn < -EPSILON {
                continue; // reflex corner, not an ear
            }
            // A collinear corner forms a zero-area ear; clipping it drains
            // duplicate or collinear vertices safely.
            let blocked = turn > EPSILON
                && ring.iter().any(|&other| {
                    other != prev
                        && other != curr
                        && other != next
                        && strictly_inside(projected[other], a, b, c, winding)
                });
            if blocked {
                continue;
            }

            out.push(corner_triangle(polygon, prev, curr, next));
            ring.remove(i);
            clipped = true;
            break;
        }
        if !clipped {
            // Self-intersecting or otherwise non-simple input: degrade to a
            // fan step so the loop always terminates with n−2 triangles.
            out.push(corner_triangle(polygon, ring[0], ring[1], ring[2]));
            ring.remove(1);
        }
    }
    out.push(corner_triangle(polygon, ring[0], ring[1], ring[2]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2 as Uv;

    fn planar_mesh(points: Vec<Vec3>) -> Mesh {
        let n = points.len();
        Mesh::new(
            points,
            Vec::new(),
            Vec::new(),
            vec![Polygon::from_vertices((0..n).collect())],
        )
    }

    fn regular_ngon(n: usize) -> Mesh {
        let points = (0..n)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / n as f32;
                Vec3::new(angle.cos(), angle.sin(), 0.0)
            })
            .collect();
        planar_mesh(points)
    }

    #[test]
    fn fan_ngon_yields_n_minus_2_triangles() {
        for n in 3..=8 {
            let tri = triangulate(&regular_ngon(n), TriangulationStrategy::Fan);
            assert_eq!(tri.polygons.len(), n - 2);
            for polygon in &tri.polygons {
                assert_eq!(polygon.vertices.len(), 3);
                // Every fan triangle shares vertex 0
                assert_eq!(polygon.vertices[0], 0);
            }
        }
    }

    #[test]
    fn triangle_passes_through_unchanged() {
        let mesh = regular_ngon(3);
        for strategy in [TriangulationStrategy::Fan, TriangulationStrategy::EarClipping] {
            let tri = triangulate(&mesh, strategy);
            assert_eq!(tri.polygons, mesh.polygons);
        }
    }

    #[test]
    fn degenerate_polygons_are_dropped() {
        let mut mesh = regular_ngon(4);
        mesh.polygons.push(Polygon::from_vertices(vec![0, 1]));
        mesh.polygons.push(Polygon::from_vertices(vec![2]));
        let tri = triangulate(&mesh, TriangulationStrategy::Fan);
        assert_eq!(tri.polygons.len(), 2);
    }

    #[test]
    fn ear_clipping_convex_counts() {
        for n in 4..=8 {
            let tri = triangulate(&regular_ngon(n), TriangulationStrategy::EarClipping);
            assert_eq!(tri.polygons.len(), n - 2);
        }
    }

    #[test]
    fn ear_clipping_concave_polygon() {
        // An arrowhead: vertex 3 is reflex. A naive fan from vertex 0 would
        // emit a triangle outside the polygon; ear clipping must not emit
        // the reflex corner's spanning triangle (0, 2, 4 region).
        let mesh = planar_mesh(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(4.0, 4.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0), // reflex
            Vec3::new(0.0, 4.0, 0.0),
        ]);
        let tri = triangulate(&mesh, TriangulationStrategy::EarClipping);
        assert_eq!(tri.polygons.len(), 3);
        // The reflex vertex must appear in the output; cutting it away
        // entirely would leave the notch filled.
        assert!(tri.polygons.iter().any(|p| p.vertices.contains(&3)));
    }

    #[test]
    fn ear_clipping_handles_tilted_plane() {
        // Same concave outline rotated out of the XY plane; the projection
        // step must pick a stable 2D basis from the polygon's own normal.
        let tilt = |x: f32, y: f32| Vec3::new(x, y * 0.5, y * 0.8661);
        let mesh = planar_mesh(vec![
            tilt(0.0, 0.0),
            tilt(4.0, 0.0),
            tilt(4.0, 4.0),
            tilt(2.0, 1.0),
            tilt(0.0, 4.0),
        ]);
        let tri = triangulate(&mesh, TriangulationStrategy::EarClipping);
        assert_eq!(tri.polygons.len(), 3);
    }

    #[test]
    #[should_panic]
    fn ear_clipping_rejects_out_of_range_indices() {
        let mut mesh = regular_ngon(5);
        mesh.polygons[0].vertices[2] = 99;
        triangulate(&mesh, TriangulationStrategy::EarClipping);
    }

    #[test]
    fn uv_and_normal_indices_propagate_in_lockstep() {
        let mut mesh = regular_ngon(4);
        mesh.uvs = vec![
            Uv::new(0.0, 0.0),
            Uv::new(1.0, 0.0),
            Uv::new(1.0, 1.0),
            Uv::new(0.0, 1.0),
        ];
        mesh.normals = vec![Vec3::FORWARD; 4];
        // uv/normal lists deliberately differ from the vertex list
        mesh.polygons[0] = Polygon::new(
            vec![0, 1, 2, 3],
            vec![3, 2, 1, 0],
            vec![1, 0, 3, 2],
        )
        .unwrap();

        for strategy in [TriangulationStrategy::Fan, TriangulationStrategy::EarClipping] {
            let tri = triangulate(&mesh, strategy);
            for polygon in &tri.polygons {
                assert_eq!(polygon.uvs.len(), 3);
                assert_eq!(polygon.normals.len(), 3);
                for (k, &v) in polygon.vertices.iter().enumerate() {
                    // Corner v came from original corner position v, whose
                    // parallel indices were 3-v (uvs) and v^1 (normals)
                    assert_eq!(polygon.uvs[k], 3 - v);
                    assert_eq!(polygon.normals[k], v ^ 1);
                }
            }
        }
    }

    #[test]
    fn shares_source_arrays() {
        let mesh = regular_ngon(5);
        let tri = triangulate(&mesh, TriangulationStrategy::Fan);
        assert_eq!(tri.vertices, mesh.vertices);
        assert_eq!(tri.uvs, mesh.uvs);
        assert_eq!(tri.normals, mesh.normals);
    }
}
