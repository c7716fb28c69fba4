use std::rc::Rc;

use crate::colors;
use crate::error::RenderError;
use crate::math::vec4::Vec4;
use crate::texture::{TexCoord, Texture};

/// A triangle flowing through the back half of the pipeline.
///
/// Before projection `points` are view-space positions with `w = 1`; after
/// projection they hold screen-space x/y, NDC depth in z, and the original
/// view-space depth in `w`.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec4; 3],
    pub texcoords: [TexCoord; 3],
    pub color: u32,
    pub texture: Option<Rc<Texture>>,
}

impl Triangle {
    pub fn new(points: [Vec4; 3], texcoords: [TexCoord; 3]) -> Self {
        Self {
            points,
            texcoords,
            color: colors::WHITE,
            texture: None,
        }
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture(mut self, texture: Option<Rc<Texture>>) -> Self {
        self.texture = texture;
        self
    }
}

/// Per-frame list of triangles waiting for rasterization.
///
/// Holds at most `capacity` triangles; pushing past that is an error rather
/// than a silent truncation.
#[derive(Debug)]
pub struct TriangleBuffer {
    triangles: Vec<Triangle>,
    capacity: usize,
}

impl TriangleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    pub fn push(&mut self, triangle: Triangle) -> Result<(), RenderError> {
        if self.triangles.len() >= self.capacity {
            return Err(RenderError::TriangleCapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.triangles.push(triangle);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.triangles.clear();
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles
    }
}

impl<'a> IntoIterator for &'a TriangleBuffer {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Triangle {
        Triangle::new([Vec4::default(); 3], [TexCoord::default(); 3])
    }

    #[test]
    fn builder_sets_color_and_texture() {
        let texture = Rc::new(Texture::new(1, 1, vec![colors::RED]).unwrap());
        let t = sample()
            .with_color(colors::BLUE)
            .with_texture(Some(texture.clone()));
        assert_eq!(t.color, colors::BLUE);
        assert!(Rc::ptr_eq(t.texture.as_ref().unwrap(), &texture));
    }

    #[test]
    fn buffer_rejects_pushes_past_capacity() {
        let mut buffer = TriangleBuffer::new(2);
        buffer.push(sample()).unwrap();
        buffer.push(sample()).unwrap();
        assert_eq!(
            buffer.push(sample()),
            Err(RenderError::TriangleCapacityExceeded { capacity: 2 })
        );
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn clear_empties_but_keeps_capacity() {
        let mut buffer = TriangleBuffer::new(1);
        buffer.push(sample()).unwrap();
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 1);
        assert!(buffer.push(sample()).is_ok());
    }
}
