//! Convex polygons produced by clipping a triangle.

use crate::error::RenderError;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::render::triangle::Triangle;
use crate::texture::TexCoord;

use super::plane::Plane;

/// Upper bound on polygon size.
///
/// Clipping a triangle against six planes adds at most one vertex per plane,
/// so nine is the most the pipeline ever produces. The tenth slot is headroom
/// for intersections that land on a plane within float error.
pub const MAX_POLYGON_VERTICES: usize = 10;

/// A polygon as parallel vertex and texture coordinate lists.
///
/// Both lists always have the same length. A length of zero means the
/// polygon was clipped away completely.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec3>,
    texcoords: Vec<TexCoord>,
}

impl Polygon {
    /// Create a polygon from a triangle (3 vertices).
    pub fn from_triangle(vertices: [Vec3; 3], texcoords: [TexCoord; 3]) -> Self {
        let mut polygon = Self::with_capacity();
        polygon.vertices.extend_from_slice(&vertices);
        polygon.texcoords.extend_from_slice(&texcoords);
        polygon
    }

    /// Builds a polygon from arbitrary parallel lists.
    ///
    /// Fails if the lists differ in length or exceed [`MAX_POLYGON_VERTICES`].
    pub fn new(vertices: Vec<Vec3>, texcoords: Vec<TexCoord>) -> Result<Self, RenderError> {
        if vertices.len() != texcoords.len() {
            return Err(RenderError::MismatchedPolygon {
                vertices: vertices.len(),
                texcoords: texcoords.len(),
            });
        }
        if vertices.len() > MAX_POLYGON_VERTICES {
            return Err(RenderError::PolygonCapacityExceeded {
                capacity: MAX_POLYGON_VERTICES,
            });
        }
        Ok(Self {
            vertices,
            texcoords,
        })
    }

    fn with_capacity() -> Self {
        Self {
            vertices: Vec::with_capacity(MAX_POLYGON_VERTICES),
            texcoords: Vec::with_capacity(MAX_POLYGON_VERTICES),
        }
    }

    fn push(&mut self, vertex: Vec3, texcoord: TexCoord) -> Result<(), RenderError> {
        if self.vertices.len() == MAX_POLYGON_VERTICES {
            return Err(RenderError::PolygonCapacityExceeded {
                capacity: MAX_POLYGON_VERTICES,
            });
        }
        self.vertices.push(vertex);
        self.texcoords.push(texcoord);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn texcoords(&self) -> &[TexCoord] {
        &self.texcoords
    }

    /// Clips this polygon against one plane (Sutherland-Hodgman).
    ///
    /// Walks every edge `previous -> current` of the closed outline, starting
    /// with the edge from the last vertex back to the first. An edge whose
    /// endpoints lie on opposite sides contributes its intersection point;
    /// a current vertex strictly inside is kept as-is. Position and texture
    /// coordinate are interpolated with the same `t`.
    pub fn clip_against_plane(&mut self, plane: &Plane) -> Result<(), RenderError> {
        let count = self.vertices.len();
        let mut output = Self::with_capacity();

        for current in 0..count {
            let previous = (current + count - 1) % count;

            let prev_vertex = self.vertices[previous];
            let curr_vertex = self.vertices[current];
            let prev_dot = plane.signed_distance(prev_vertex);
            let curr_dot = plane.signed_distance(curr_vertex);

            if prev_dot * curr_dot < 0.0 {
                let t = prev_dot / (prev_dot - curr_dot);
                output.push(
                    prev_vertex.lerp(curr_vertex, t),
                    self.texcoords[previous].lerp(self.texcoords[current], t),
                )?;
            }

            if curr_dot > 0.0 {
                output.push(curr_vertex, self.texcoords[current])?;
            }
        }

        *self = output;
        Ok(())
    }

    /// Fan-triangulates from vertex 0.
    ///
    /// Yields `len - 2` triangles `(0, i + 1, i + 2)`, or none when fewer than
    /// three vertices remain. Points come out with `w = 1`, white, untextured.
    pub fn triangulate(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.len().saturating_sub(2)).map(move |i| {
            let idx = [0, i + 1, i + 2];
            Triangle::new(
                idx.map(|j| Vec4::from_vec3(self.vertices[j])),
                idx.map(|j| self.texcoords[j]),
            )
        })
    }
}
