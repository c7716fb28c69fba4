//! Scanline triangle rasterization.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by y (top to bottom in screen space) with three
//!    conditional swaps. Attributes travel with their vertex.
//! 2. **Split** the triangle at the middle vertex's y. The split point `M`
//!    lies on the long edge `a -> c`, found by similar triangles.
//! 3. **Fill** each half one row at a time between its two active edges.
//!
//! ```text
//!        a                    a
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>    b /----\ M   flat-bottom half
//!   b /      \              \     \
//!      \      \              \     \   flat-top half
//!        \     \               \    \
//!          \    \                \   \
//!             \  c                  \ c
//! ```
//!
//! A half with zero height (the triangle was already flat-top or
//! flat-bottom) simply covers no rows.
//!
//! # Coverage
//!
//! Rows `ceil(y_top)..ceil(y_bottom)` and columns `ceil(x_left)..ceil(x_right)`
//! are filled, so two triangles sharing an edge never both cover a pixel on it
//! and never leave a gap between them.
//!
//! # Interpolation
//!
//! Per pixel, barycentric weights are taken against the whole sorted triangle
//! (never against a half), then `1/w` is interpolated for depth and handed to
//! the shader for perspective-correct attributes.

use super::{barycentric_weights, PixelShader, ScreenVertex};
use crate::math::vec2::Vec2;
use crate::render::framebuffer::FrameBuffer;

/// One triangle edge, walked top to bottom.
#[derive(Clone, Copy)]
struct Edge {
    x0: f32,
    y0: f32,
    inv_slope: f32,
}

impl Edge {
    /// Edge from `top` to `bottom`. Callers guarantee `bottom.y > top.y`.
    fn new(top: Vec2, bottom: Vec2) -> Self {
        Self {
            x0: top.x,
            y0: top.y,
            inv_slope: (bottom.x - top.x) / (bottom.y - top.y),
        }
    }

    #[inline]
    fn x_at(&self, y: f32) -> f32 {
        self.x0 + (y - self.y0) * self.inv_slope
    }
}

fn sort_by_y(vertices: [ScreenVertex; 3]) -> [ScreenVertex; 3] {
    let [mut a, mut b, mut c] = vertices;
    if b.y < a.y {
        std::mem::swap(&mut a, &mut b);
    }
    if c.y < b.y {
        std::mem::swap(&mut b, &mut c);
    }
    if b.y < a.y {
        std::mem::swap(&mut a, &mut b);
    }
    [a, b, c]
}

/// Rasterizes one triangle into `buffer` with depth testing.
///
/// Degenerate triangles (zero screen area) draw nothing. Pixels outside the
/// buffer are skipped.
pub fn rasterize<S: PixelShader>(buffer: &mut FrameBuffer, vertices: [ScreenVertex; 3], shader: &S) {
    let sorted = sort_by_y(vertices);
    let [a, b, c] = sorted.map(|v| v.position());

    if barycentric_weights(a, b, c, a).is_none() {
        return;
    }

    let mid = Vec2::new(a.x + (c.x - a.x) * (b.y - a.y) / (c.y - a.y), b.y);

    if b.y > a.y {
        fill_rows(buffer, &sorted, shader, a.y, b.y, Edge::new(a, b), Edge::new(a, mid));
    }
    if c.y > b.y {
        fill_rows(buffer, &sorted, shader, b.y, c.y, Edge::new(b, c), Edge::new(mid, c));
    }
}

fn fill_rows<S: PixelShader>(
    buffer: &mut FrameBuffer,
    sorted: &[ScreenVertex; 3],
    shader: &S,
    y_top: f32,
    y_bottom: f32,
    left: Edge,
    right: Edge,
) {
    let [a, b, c] = sorted.map(|v| v.position());
    let height = buffer.height() as i32;
    let width = buffer.width() as i32;

    let y_start = (y_top.ceil() as i32).max(0);
    let y_end = (y_bottom.ceil() as i32).min(height);

    for y in y_start..y_end {
        let yf = y as f32;
        let mut x_left = left.x_at(yf);
        let mut x_right = right.x_at(yf);
        if x_left > x_right {
            std::mem::swap(&mut x_left, &mut x_right);
        }

        let x_start = (x_left.ceil() as i32).max(0);
        let x_end = (x_right.ceil() as i32).min(width);

        for x in x_start..x_end {
            let Some(weights) = barycentric_weights(a, b, c, Vec2::new(x as f32, yf)) else {
                return;
            };
            let [alpha, beta, gamma] = weights;
            let inv_w = alpha * sorted[0].inv_w + beta * sorted[1].inv_w + gamma * sorted[2].inv_w;
            let depth = 1.0 - inv_w;

            if buffer.depth(x, y).is_some_and(|current| depth < current) {
                let color = shader.shade(sorted, weights, inv_w);
                buffer.set_pixel_with_depth(x, y, depth, color);
            }
        }
    }
}
