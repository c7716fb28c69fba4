//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer owns coverage, barycentric weights and the depth test; a
//! shader only turns the weights of one covered pixel into a color. The
//! shader is picked once per triangle and the scanline loop is monomorphized
//! over it, so nothing is re-decided per pixel.

use super::ScreenVertex;
use crate::texture::Texture;

/// Per-pixel color computation.
pub trait PixelShader {
    /// Color for one pixel.
    ///
    /// # Arguments
    /// * `vertices` - The triangle's corners, sorted by ascending y
    /// * `weights` - Barycentric weights of the pixel against `vertices`
    /// * `inv_w` - Interpolated `1/w` at the pixel, always positive
    fn shade(&self, vertices: &[ScreenVertex; 3], weights: [f32; 3], inv_w: f32) -> u32;
}

/// Returns a constant color, already lit per face.
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _vertices: &[ScreenVertex; 3], _weights: [f32; 3], _inv_w: f32) -> u32 {
        self.color
    }
}

/// Samples a texture at perspective-correct UV coordinates.
///
/// `u/w` and `v/w` are interpolated linearly in screen space and divided by
/// the interpolated `1/w` to undo the perspective distortion. No lighting is
/// applied.
pub struct TextureShader<'a> {
    texture: &'a Texture,
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture) -> Self {
        Self { texture }
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, vertices: &[ScreenVertex; 3], weights: [f32; 3], inv_w: f32) -> u32 {
        let [a, b, c] = vertices;
        let [alpha, beta, gamma] = weights;
        let u_over_w = alpha * a.u_over_w + beta * b.u_over_w + gamma * c.u_over_w;
        let v_over_w = alpha * a.v_over_w + beta * b.v_over_w + gamma * c.v_over_w;
        self.texture.sample(u_over_w / inv_w, v_over_w / inv_w)
    }
}
