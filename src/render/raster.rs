//! Depth-tested drawing of the three primitive classes.
//!
//! Triangles use the edge function algorithm: iterate the bounding box and
//! test each pixel center against the three edge equations, which also
//! yields the barycentric weights used to interpolate depth. Lines use
//! Bresenham's algorithm with depth interpolated along the run. Points are
//! filled squares at constant depth.
//!
//! Screen-space depth interpolation is linear in NDC z; that matches what a
//! fixed-function depth buffer stores and is exact for the flat-colored
//! primitives drawn here.

use super::framebuffer::FrameBuffer;
use crate::camera::ScreenPoint;

/// Edge function for edge (a -> b) evaluated at point (px, py).
///
/// This is the 2D cross product (p - a) x (b - a). In this crate's y-down
/// screen space a triangle that appears counter-clockwise to the camera
/// has positive signed area.
#[inline]
pub(crate) fn edge_function(a: &ScreenPoint, b: &ScreenPoint, px: f64, py: f64) -> f64 {
    (px - a.x) * (b.y - a.y) - (py - a.y) * (b.x - a.x)
}

/// Twice the signed area of the screen-space triangle.
///
/// Positive for front-facing (counter-clockwise as seen by the camera)
/// triangles; the pipeline culls on `<= 0`.
#[inline]
pub(crate) fn signed_area(v: &[ScreenPoint; 3]) -> f64 {
    edge_function(&v[0], &v[1], v[2].x, v[2].y)
}

/// Fills a triangle with a flat color, depth-testing every pixel.
///
/// Handles both windings; back-face culling is the caller's decision.
/// Zero-area triangles are skipped.
pub(crate) fn fill_triangle(fb: &mut FrameBuffer, v: &[ScreenPoint; 3], color: [u8; 3]) {
    let area = signed_area(v);
    if area.abs() < f64::EPSILON {
        return; // Degenerate triangle
    }
    let inv_area = 1.0 / area;

    // Bounding box clipped to the framebuffer.
    let min_x = (v[0].x.min(v[1].x).min(v[2].x).floor() as i32).max(0);
    let max_x = (v[0].x.max(v[1].x).max(v[2].x).ceil() as i32).min(fb.width() as i32 - 1);
    let min_y = (v[0].y.min(v[1].y).min(v[2].y).floor() as i32).max(0);
    let max_y = (v[0].y.max(v[1].y).max(v[2].y).ceil() as i32).min(fb.height() as i32 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            // Sample at the pixel center.
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;

            let w0 = edge_function(&v[1], &v[2], px, py);
            let w1 = edge_function(&v[2], &v[0], px, py);
            let w2 = edge_function(&v[0], &v[1], px, py);

            // Inside test matching the triangle's winding.
            let inside = if area > 0.0 {
                w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
            } else {
                w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
            };

            if inside {
                // Barycentric depth interpolation.
                let depth = (w0 * v[0].depth + w1 * v[1].depth + w2 * v[2].depth) * inv_area;
                fb.set_pixel_with_depth(x, y, depth, color);
            }
        }
    }
}

/// Clips a segment to the framebuffer rectangle with the Liang-Barsky
/// algorithm, interpolating depth along with position.
///
/// The rectangle is expanded by one pixel on the near sides so rounding at
/// the boundary still lands on edge pixels. Vertices barely in front of the
/// eye plane project to screen coordinates in the billions; clipping here
/// keeps those magnitudes out of the integer Bresenham loop entirely.
fn clip_segment(
    a: &ScreenPoint,
    b: &ScreenPoint,
    width: u32,
    height: u32,
) -> Option<(ScreenPoint, ScreenPoint)> {
    let x_max = width.min(i32::MAX as u32) as f64;
    let y_max = height.min(i32::MAX as u32) as f64;
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, a.x + 1.0),
        (dx, x_max - a.x),
        (-dy, a.y + 1.0),
        (dy, y_max - a.y),
    ] {
        if p == 0.0 {
            // Parallel to this boundary: outside means fully outside.
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }

    let at = |t: f64| ScreenPoint {
        x: a.x + t * dx,
        y: a.y + t * dy,
        depth: a.depth + t * (b.depth - a.depth),
    };
    Some((at(t0), at(t1)))
}

/// Draws a 1-pixel line between two projected points with Bresenham's
/// algorithm, interpolating depth along the run.
///
/// The segment is clipped to the framebuffer first, so endpoints far
/// outside the viewport cost nothing.
pub(crate) fn draw_line(fb: &mut FrameBuffer, a: &ScreenPoint, b: &ScreenPoint, color: [u8; 3]) {
    let Some((a, b)) = clip_segment(a, b, fb.width(), fb.height()) else {
        return;
    };

    let x0 = a.x.round() as i64;
    let y0 = a.y.round() as i64;
    let x1 = b.x.round() as i64;
    let y1 = b.y.round() as i64;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();

    let steps = dx.max(dy);
    if steps == 0 {
        fb.set_pixel_with_depth(x0 as i32, y0 as i32, a.depth.min(b.depth), color);
        return;
    }

    let x_step = if x0 < x1 { 1 } else { -1 };
    let y_step = if y0 < y1 { 1 } else { -1 };

    // The error term tracks the distance to the ideal line; a positive
    // value favors an x step, negative favors y.
    let mut err = dx - dy;

    let mut x = x0;
    let mut y = y0;
    let mut step = 0i64;

    loop {
        let t = step as f64 / steps as f64;
        let depth = a.depth + t * (b.depth - a.depth);
        fb.set_pixel_with_depth(x as i32, y as i32, depth, color);

        if x == x1 && y == y1 {
            break;
        }
        step += 1;

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += x_step;
        }
        if e2 < dx {
            err += dx;
            y += y_step;
        }
    }
}

/// Draws a point as a `size` x `size` square centered on the projected
/// position, at constant depth.
///
/// The square is intersected with the framebuffer in i64 before iterating;
/// far-offscreen centers (near-eye-plane projections) draw nothing.
pub(crate) fn draw_point(fb: &mut FrameBuffer, p: &ScreenPoint, size: u32, color: [u8; 3]) {
    let size = size.max(1) as i64;
    let half = (size - 1) / 2;
    let x0 = (p.x.round() as i64).saturating_sub(half);
    let y0 = (p.y.round() as i64).saturating_sub(half);

    let x_lo = x0.max(0);
    let x_hi = x0.saturating_add(size).min(fb.width().min(i32::MAX as u32) as i64);
    let y_lo = y0.max(0);
    let y_hi = y0.saturating_add(size).min(fb.height().min(i32::MAX as u32) as i64);

    for y in y_lo..y_hi {
        for x in x_lo..x_hi {
            fb.set_pixel_with_depth(x as i32, y as i32, p.depth, color);
        }
    }
}
