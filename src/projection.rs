//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for all perspective
//! projection parameters (FOV, aspect ratio, near/far planes). It generates
//! the projection matrix and the view-space frustum planes for clipping, and
//! maps projected points onto the screen.

use crate::clipper::FrustumPlanes;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    /// Near clipping plane distance.
    z_near: f32,
    /// Far clipping plane distance.
    z_far: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Horizontal field of view in radians, derived from `fov_y` and the
    /// aspect ratio.
    pub fn fov_x(&self) -> f32 {
        2.0 * (self.aspect_ratio * (self.fov_y / 2.0).tan()).atan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }

    /// Builds the view-space frustum planes used by the clipper.
    pub fn frustum_planes(&self) -> FrustumPlanes {
        FrustumPlanes::new(self.fov_x(), self.fov_y, self.z_near, self.z_far)
    }

    /// Maps a perspective-divided point to pixel coordinates.
    ///
    /// NDC x and y in `[-1, 1]` are scaled by half the viewport and re-centered;
    /// y is negated because screen rows grow downward. z and w pass through.
    pub fn to_screen(ndc: Vec4, width: u32, height: u32) -> Vec4 {
        let half_w = width as f32 / 2.0;
        let half_h = height as f32 / 2.0;
        Vec4::new(ndc.x * half_w + half_w, -ndc.y * half_h + half_h, ndc.z, ndc.w)
    }

    /// Recovers a view-space point from NDC x/y and its view depth `w`.
    ///
    /// Depth non-linearity is ignored: the returned z is `w` itself.
    pub fn unproject(&self, ndc_x: f32, ndc_y: f32, w: f32) -> Vec3 {
        let m = self.matrix();
        Vec3::new(ndc_x * w / m.get(0, 0), ndc_y * w / m.get(1, 1), w)
    }
}
