//! View-space frustum planes.

use crate::error::RenderError;
use crate::math::vec3::Vec3;

use super::polygon::Polygon;

/// A plane defined by a point on the plane and its normal vector.
/// The normal points toward the "inside" (visible) half-space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub const fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// Returns the signed distance from a point to this plane.
    /// Positive = inside (same side as normal), Negative = outside.
    #[inline]
    pub fn signed_distance(&self, position: Vec3) -> f32 {
        self.normal.dot(position - self.point)
    }
}

/// Index of each plane inside [`FrustumPlanes`], in clipping order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrustumSide {
    Left = 0,
    Right = 1,
    Top = 2,
    Bottom = 3,
    Near = 4,
    Far = 5,
}

/// The six view-space planes bounding the visible volume.
///
/// Built once from the projection parameters; there is no way to change a
/// plane afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct FrustumPlanes {
    planes: [Plane; 6],
}

impl FrustumPlanes {
    /// Creates the frustum from projection parameters.
    ///
    /// # Arguments
    /// * `fov_x` - Horizontal field of view in radians
    /// * `fov_y` - Vertical field of view in radians
    /// * `z_near` - Near clipping plane distance
    /// * `z_far` - Far clipping plane distance
    pub fn new(fov_x: f32, fov_y: f32, z_near: f32, z_far: f32) -> Self {
        let (sin_x, cos_x) = (fov_x / 2.0).sin_cos();
        let (sin_y, cos_y) = (fov_y / 2.0).sin_cos();
        let origin = Vec3::ZERO;

        Self {
            planes: [
                Plane::new(origin, Vec3::new(cos_x, 0.0, sin_x)),
                Plane::new(origin, Vec3::new(-cos_x, 0.0, sin_x)),
                Plane::new(origin, Vec3::new(0.0, -cos_y, sin_y)),
                Plane::new(origin, Vec3::new(0.0, cos_y, sin_y)),
                Plane::new(Vec3::new(0.0, 0.0, z_near), Vec3::new(0.0, 0.0, 1.0)),
                Plane::new(Vec3::new(0.0, 0.0, z_far), Vec3::new(0.0, 0.0, -1.0)),
            ],
        }
    }

    pub fn plane(&self, side: FrustumSide) -> &Plane {
        &self.planes[side as usize]
    }

    /// All planes in clipping order: left, right, top, bottom, near, far.
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Clips `polygon` against every plane in order.
    ///
    /// Each stage consumes the previous stage's output. Once the polygon is
    /// empty the remaining planes are skipped.
    pub fn clip_polygon(&self, polygon: &mut Polygon) -> Result<(), RenderError> {
        for plane in &self.planes {
            if polygon.is_empty() {
                break;
            }
            polygon.clip_against_plane(plane)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TexCoord;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn tri(a: Vec3, b: Vec3, c: Vec3) -> Polygon {
        Polygon::from_triangle([a, b, c], [TexCoord::default(); 3])
    }

    #[test]
    fn side_planes_pass_through_origin() {
        let frustum = FrustumPlanes::new(FRAC_PI_2, FRAC_PI_2, 1.0, 10.0);
        for side in [
            FrustumSide::Left,
            FrustumSide::Right,
            FrustumSide::Top,
            FrustumSide::Bottom,
        ] {
            assert_eq!(frustum.plane(side).point, Vec3::ZERO);
        }
        assert_eq!(frustum.plane(FrustumSide::Near).point, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(frustum.plane(FrustumSide::Far).normal, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn left_normal_uses_half_horizontal_fov() {
        let frustum = FrustumPlanes::new(FRAC_PI_2, 1.0, 1.0, 10.0);
        let left = frustum.plane(FrustumSide::Left).normal;
        let right = frustum.plane(FrustumSide::Right).normal;
        let half = (FRAC_PI_2 / 2.0).cos();
        assert_relative_eq!(left.x, half, epsilon = 1e-6);
        assert_relative_eq!(left.z, half, epsilon = 1e-6);
        assert_relative_eq!(right.x, -half, epsilon = 1e-6);
    }

    #[test]
    fn center_axis_is_inside_every_plane() {
        let frustum = FrustumPlanes::new(1.2, 0.9, 0.5, 50.0);
        let p = Vec3::new(0.0, 0.0, 10.0);
        for plane in frustum.planes() {
            assert!(plane.signed_distance(p) > 0.0);
        }
    }

    #[test]
    fn visible_triangle_survives_all_planes() {
        let frustum = FrustumPlanes::new(FRAC_PI_2, FRAC_PI_2, 1.0, 100.0);
        let mut polygon = tri(
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
        );
        let before = polygon.clone();
        frustum.clip_polygon(&mut polygon).unwrap();
        assert_eq!(polygon, before);
    }

    #[test]
    fn triangle_behind_camera_is_removed() {
        let frustum = FrustumPlanes::new(FRAC_PI_2, FRAC_PI_2, 1.0, 100.0);
        let mut polygon = tri(
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
        );
        frustum.clip_polygon(&mut polygon).unwrap();
        assert!(polygon.is_empty());
        assert_eq!(polygon.triangulate().count(), 0);
    }

    #[test]
    fn triangle_crossing_two_side_planes_grows() {
        // 90° frustum: x = ±z are the side planes
        let frustum = FrustumPlanes::new(FRAC_PI_2, FRAC_PI_2, 1.0, 100.0);
        let mut polygon = tri(
            Vec3::new(-10.0, 0.0, 5.0),
            Vec3::new(0.0, 2.0, 5.0),
            Vec3::new(10.0, 0.0, 5.0),
        );
        frustum.clip_polygon(&mut polygon).unwrap();

        assert!(polygon.len() > 3);
        for v in polygon.vertices() {
            assert!(v.x.abs() <= v.z + 1e-4);
        }
        assert_eq!(polygon.triangulate().count(), polygon.len() - 2);
    }
}
