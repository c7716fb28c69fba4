use std::fmt;
use std::path::Path;

use tracing::info;

use crate::error::{LoadError, RenderError};

/// A `(u, v)` texture coordinate. Origin bottom-left, as in OBJ files.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TexCoord {
    pub u: f32,
    pub v: f32,
}

impl TexCoord {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.u + (other.u - self.u) * t,
            self.v + (other.v - self.v) * t,
        )
    }
}

/// Represents a 2D texture for texture mapping.
///
/// Pixels are ARGB8888, row-major, origin top-left.
#[derive(Clone, PartialEq)]
pub struct Texture {
    data: Vec<u32>,
    width: u32,
    height: u32,
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Texture {
    /// Builds a texture from raw ARGB pixels.
    ///
    /// Fails if either dimension is zero or `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, RenderError> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return Err(RenderError::InvalidTexture {
                width,
                height,
                pixels: pixels.len(),
            });
        }
        Ok(Self {
            data: pixels,
            width,
            height,
        })
    }

    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        // Convert RGBA bytes to ARGB u32
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        info!(path = %path.display(), width, height, "Loaded texture");
        Ok(Self::new(width, height, data)?)
    }

    /// Samples the texel nearest to `(u, v)`.
    ///
    /// `v` is taken as already flipped to the top-left storage origin.
    /// Coordinates outside `[0, 1)` wrap around: the texel index is
    /// `floor(u * width) mod width`, and likewise for `v`.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let x = wrap((u * self.width as f32).floor(), self.width);
        let y = wrap((v * self.height as f32).floor(), self.height);
        self.data[y * self.width as usize + x]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.data
    }
}

#[inline]
fn wrap(texel: f32, size: u32) -> usize {
    if !texel.is_finite() {
        return 0;
    }
    (texel as i64).rem_euclid(size as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        // 2x2: top row red, green; bottom row blue, white
        Texture::new(2, 2, vec![0xFFFF0000, 0xFF00FF00, 0xFF0000FF, 0xFFFFFFFF]).unwrap()
    }

    #[test]
    fn rejects_mismatched_pixel_count() {
        let err = Texture::new(2, 2, vec![0; 3]).unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidTexture {
                width: 2,
                height: 2,
                pixels: 3
            }
        );
        assert!(Texture::new(0, 4, vec![]).is_err());
    }

    #[test]
    fn samples_nearest_texel() {
        let tex = checker();
        assert_eq!(tex.sample(0.1, 0.1), 0xFFFF0000);
        assert_eq!(tex.sample(0.9, 0.1), 0xFF00FF00);
        assert_eq!(tex.sample(0.1, 0.9), 0xFF0000FF);
        assert_eq!(tex.sample(0.9, 0.9), 0xFFFFFFFF);
    }

    #[test]
    fn wraps_instead_of_clamping() {
        let tex = checker();
        assert_eq!(tex.sample(1.1, 0.1), tex.sample(0.1, 0.1));
        assert_eq!(tex.sample(-0.1, 0.1), tex.sample(0.9, 0.1));
        assert_eq!(tex.sample(0.1, 1.0), tex.sample(0.1, 0.0));
        assert_eq!(tex.sample(0.1, -0.4), tex.sample(0.1, 0.6));
    }

    #[test]
    fn non_finite_coordinates_do_not_panic() {
        let tex = checker();
        assert_eq!(tex.sample(f32::NAN, f32::INFINITY), 0xFFFF0000);
    }

    #[test]
    fn texcoord_lerp() {
        let a = TexCoord::new(0.0, 1.0);
        let b = TexCoord::new(1.0, 0.0);
        assert_eq!(a.lerp(b, 0.25), TexCoord::new(0.25, 0.75));
    }
}
