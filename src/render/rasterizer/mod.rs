//! Triangle rasterization.
//!
//! Triangles arrive in screen space with the view-space depth preserved in
//! `w`. They are converted once into [`ScreenVertex`]es carrying the
//! perspective-correct attributes (`1/w`, `u/w`, `v/w`), then filled by the
//! scanline rasterizer with a [`PixelShader`] chosen by the caller.

mod scanline;
mod shader;

pub use scanline::rasterize;
pub use shader::{FlatShader, PixelShader, TextureShader};

use super::framebuffer::FrameBuffer;
use super::triangle::Triangle;
use crate::math::vec2::Vec2;
use crate::texture::Texture;

/// A triangle corner in screen space, ready for interpolation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenVertex {
    pub x: f32,
    pub y: f32,
    pub inv_w: f32,
    pub u_over_w: f32,
    pub v_over_w: f32,
}

impl ScreenVertex {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Converts the projected corners of `triangle`.
    ///
    /// V is flipped here, once per triangle, because textures are stored with
    /// a top-left origin. Returns `None` if any corner has a non-positive or
    /// non-finite `w`; clipping against the near plane keeps that from
    /// happening for triangles produced by the engine.
    pub fn from_triangle(triangle: &Triangle) -> Option<[ScreenVertex; 3]> {
        let mut out = [ScreenVertex::default(); 3];
        for ((vertex, point), uv) in out
            .iter_mut()
            .zip(&triangle.points)
            .zip(&triangle.texcoords)
        {
            if point.w <= 0.0 || !point.w.is_finite() {
                return None;
            }
            let inv_w = 1.0 / point.w;
            *vertex = ScreenVertex {
                x: point.x,
                y: point.y,
                inv_w,
                u_over_w: uv.u * inv_w,
                v_over_w: (1.0 - uv.v) * inv_w,
            };
        }
        Some(out)
    }
}

/// Barycentric weights of `p` relative to the 2D triangle `(a, b, c)`.
///
/// Computed from ratios of parallelogram areas. The three weights always sum
/// to one and are exactly the unit basis at the corners. Returns `None` for
/// a degenerate (zero-area) triangle.
#[inline]
pub fn barycentric_weights(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> Option<[f32; 3]> {
    let ac = c - a;
    let ab = b - a;
    let area = ac.cross(ab);
    if area.abs() <= f32::EPSILON {
        return None;
    }

    let ap = p - a;
    let pc = c - p;
    let pb = b - p;

    let alpha = pc.cross(pb) / area;
    let beta = ac.cross(ap) / area;
    let gamma = 1.0 - alpha - beta;
    Some([alpha, beta, gamma])
}

/// Fills `triangle` with a single color, depth-tested.
pub fn draw_filled_triangle(buffer: &mut FrameBuffer, triangle: &Triangle, color: u32) {
    if let Some(vertices) = ScreenVertex::from_triangle(triangle) {
        rasterize(buffer, vertices, &FlatShader::new(color));
    }
}

/// Fills `triangle` with perspective-correct samples from `texture`, depth-tested.
pub fn draw_textured_triangle(buffer: &mut FrameBuffer, triangle: &Triangle, texture: &Texture) {
    if let Some(vertices) = ScreenVertex::from_triangle(triangle) {
        rasterize(buffer, vertices, &TextureShader::new(texture));
    }
}
