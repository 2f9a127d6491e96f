//! Triangle and line rasterization in screen space.
//!
//! Triangles are filled with the edge-function method: a pixel center is
//! covered when its three barycentric weights are all non-negative (within
//! epsilon, so pixels on shared edges are not dropped by float noise).
//! Every covered pixel is depth-tested before the shader runs.

use crate::math::{Vec3, EPSILON};

use super::framebuffer::{DepthBuffer, PixelSurface};
use super::shader::PixelShader;

/// Pulls wireframe overlays slightly nearer so they win depth ties
/// against the coplanar fill underneath.
const WIREFRAME_DEPTH_BIAS: f32 = 1e-4;

/// Signed parallelogram area of (b − a) × (c − a), z components ignored.
///
/// Positive when `c` lies to the left of the directed edge a→b in a
/// y-down screen coordinate system.
#[inline]
pub fn edge_function(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

/// Fills one screen-space triangle.
///
/// `points` carry screen x/y in pixels and NDC z in `z`. Degenerate
/// triangles (area below epsilon) are skipped silently; they contribute
/// nothing visible and are common after projection of edge-on geometry.
pub fn fill_triangle<P, S>(surface: &mut P, depth: &mut DepthBuffer, points: [Vec3; 3], shader: &S)
where
    P: PixelSurface,
    S: PixelShader,
{
    let [v0, v1, v2] = points;
    let area = edge_function(v0, v1, v2);
    if area.abs() < EPSILON {
        return;
    }

    let max_x = surface.width() as i32 - 1;
    let max_y = surface.height() as i32 - 1;
    let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).clamp(0, max_x);
    let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).clamp(0, max_y);
    let bb_max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).clamp(0, max_x);
    let bb_max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).clamp(0, max_y);

    for y in min_y..=bb_max_y {
        for x in min_x..=bb_max_x {
            // Sample at the pixel center
            let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
            let l0 = edge_function(v1, v2, p) / area;
            let l1 = edge_function(v2, v0, p) / area;
            let l2 = edge_function(v0, v1, p) / area;
            if l0 < -EPSILON || l1 < -EPSILON || l2 < -EPSILON {
                continue;
            }
            let z = l0 * v0.z + l1 * v1.z + l2 * v2.z;
            if depth.test_and_set(x, y, z) {
                surface.set_pixel(x, y, shader.shade([l0, l1, l2]));
            }
        }
    }
}

/// Draws a depth-tested line with Bresenham stepping.
///
/// Depth is interpolated linearly along the line and biased nearer so
/// outlines drawn over their own fill remain visible.
pub fn draw_line<P: PixelSurface>(
    surface: &mut P,
    depth: &mut DepthBuffer,
    from: Vec3,
    to: Vec3,
    color: u32,
) {
    let x0 = from.x.round() as i32;
    let y0 = from.y.round() as i32;
    let x1 = to.x.round() as i32;
    let y1 = to.y.round() as i32;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let steps = dx.max(-dy).max(1) as f32;

    let mut err = dx + dy;
    let mut x = x0;
    let mut y = y0;
    let mut step = 0.0;
    loop {
        let t = step / steps;
        let z = from.z + (to.z - from.z) * t - WIREFRAME_DEPTH_BIAS;
        if depth.test_and_set(x, y, z) {
            surface.set_pixel(x, y, color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        step += 1.0;
    }
}

/// Draws the three edges of a triangle as depth-tested lines.
pub fn draw_triangle_wireframe<P: PixelSurface>(
    surface: &mut P,
    depth: &mut DepthBuffer,
    points: [Vec3; 3],
    color: u32,
) {
    draw_line(surface, depth, points[0], points[1], color);
    draw_line(surface, depth, points[1], points[2], color);
    draw_line(surface, depth, points[2], points[0], color);
}

/// Draws a small filled square centered on `point`, depth-tested at the
/// point's depth. Used for vertex markers and debug overlays.
pub fn draw_marker<P: PixelSurface>(
    surface: &mut P,
    depth: &mut DepthBuffer,
    point: Vec3,
    half_extent: i32,
    color: u32,
) {
    let cx = point.x.round() as i32;
    let cy = point.y.round() as i32;
    let z = point.z - WIREFRAME_DEPTH_BIAS;
    for y in (cy - half_extent)..=(cy + half_extent) {
        for x in (cx - half_extent)..=(cx + half_extent) {
            if depth.test_and_set(x, y, z) {
                surface.set_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::render::framebuffer::FrameBuffer;
    use crate::render::shader::FlatShader;

    const RED: u32 = 0xFFFF_0000;

    fn count_colored(fb: &FrameBuffer, color: u32) -> usize {
        fb.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn fills_roughly_half_a_square() {
        let mut fb = FrameBuffer::new(20, 20);
        let mut depth = DepthBuffer::new(20, 20);
        let tri = [
            Vec3::new(0.0, 0.0, 0.5),
            Vec3::new(20.0, 0.0, 0.5),
            Vec3::new(0.0, 20.0, 0.5),
        ];
        fill_triangle(&mut fb, &mut depth, tri, &FlatShader { color: RED });
        let filled = count_colored(&fb, RED);
        assert!(filled > 150 && filled < 250, "filled {filled} pixels");
    }

    #[test]
    fn winding_does_not_affect_coverage() {
        let tri = [
            Vec3::new(2.0, 2.0, 0.5),
            Vec3::new(17.0, 3.0, 0.5),
            Vec3::new(9.0, 16.0, 0.5),
        ];
        let mut forward = FrameBuffer::new(20, 20);
        let mut reverse = FrameBuffer::new(20, 20);
        let mut depth = DepthBuffer::new(20, 20);
        fill_triangle(&mut forward, &mut depth, tri, &FlatShader { color: RED });
        depth.clear();
        let flipped = [tri[2], tri[1], tri[0]];
        fill_triangle(&mut reverse, &mut depth, flipped, &FlatShader { color: RED });
        assert_eq!(forward.pixels(), reverse.pixels());
    }

    #[test]
    fn degenerate_triangle_is_skipped() {
        let mut fb = FrameBuffer::new(10, 10);
        let mut depth = DepthBuffer::new(10, 10);
        let collinear = [
            Vec3::new(1.0, 1.0, 0.5),
            Vec3::new(5.0, 5.0, 0.5),
            Vec3::new(9.0, 9.0, 0.5),
        ];
        fill_triangle(&mut fb, &mut depth, collinear, &FlatShader { color: RED });
        assert_eq!(count_colored(&fb, RED), 0);
    }

    #[test]
    fn offscreen_triangle_writes_nothing() {
        let mut fb = FrameBuffer::new(10, 10);
        let mut depth = DepthBuffer::new(10, 10);
        let tri = [
            Vec3::new(-30.0, -30.0, 0.5),
            Vec3::new(-20.0, -30.0, 0.5),
            Vec3::new(-25.0, -20.0, 0.5),
        ];
        fill_triangle(&mut fb, &mut depth, tri, &FlatShader { color: RED });
        assert_eq!(count_colored(&fb, RED), 0);
    }

    #[test]
    fn nearer_triangle_wins_regardless_of_order() {
        let near = [
            Vec3::new(0.0, 0.0, 0.2),
            Vec3::new(10.0, 0.0, 0.2),
            Vec3::new(0.0, 10.0, 0.2),
        ];
        let far = [
            Vec3::new(0.0, 0.0, 0.8),
            Vec3::new(10.0, 0.0, 0.8),
            Vec3::new(0.0, 10.0, 0.8),
        ];
        let near_shader = FlatShader { color: RED };
        let far_shader = FlatShader { color: 0xFF00_FF00 };

        let mut fb = FrameBuffer::new(10, 10);
        let mut depth = DepthBuffer::new(10, 10);
        fill_triangle(&mut fb, &mut depth, near, &near_shader);
        fill_triangle(&mut fb, &mut depth, far, &far_shader);
        let near_first = count_colored(&fb, RED);

        let mut fb2 = FrameBuffer::new(10, 10);
        let mut depth2 = DepthBuffer::new(10, 10);
        fill_triangle(&mut fb2, &mut depth2, far, &far_shader);
        fill_triangle(&mut fb2, &mut depth2, near, &near_shader);
        let far_first = count_colored(&fb2, RED);

        assert_eq!(near_first, far_first);
        assert_eq!(count_colored(&fb2, 0xFF00_FF00), 0);
    }

    #[test]
    fn line_endpoints_are_plotted() {
        let mut fb = FrameBuffer::new(10, 10);
        let mut depth = DepthBuffer::new(10, 10);
        draw_line(
            &mut fb,
            &mut depth,
            Vec3::new(1.0, 1.0, 0.5),
            Vec3::new(8.0, 5.0, 0.5),
            RED,
        );
        assert_eq!(fb.pixel(1, 1), Some(RED));
        assert_eq!(fb.pixel(8, 5), Some(RED));
    }

    #[test]
    fn wireframe_bias_wins_over_coplanar_fill() {
        let mut fb = FrameBuffer::new(20, 20);
        let mut depth = DepthBuffer::new(20, 20);
        let tri = [
            Vec3::new(1.0, 1.0, 0.5),
            Vec3::new(18.0, 1.0, 0.5),
            Vec3::new(1.0, 18.0, 0.5),
        ];
        fill_triangle(&mut fb, &mut depth, tri, &FlatShader { color: RED });
        draw_triangle_wireframe(&mut fb, &mut depth, tri, colors::WIREFRAME);
        assert!(count_colored(&fb, colors::WIREFRAME) > 0);
    }

    #[test]
    fn marker_fills_its_square() {
        let mut fb = FrameBuffer::new(10, 10);
        let mut depth = DepthBuffer::new(10, 10);
        draw_marker(&mut fb, &mut depth, Vec3::new(5.0, 5.0, 0.5), 1, colors::VERTEX);
        assert_eq!(count_colored(&fb, colors::VERTEX), 9);
    }
}
