//! Scale, rotation and translation of a mesh.
//!
//! Provides a [`Transform`] struct with a fluent API for managing
//! translation, rotation (Euler angles), and scale.

use crate::math::{mat4::Mat4, vec3::Vec3};

/// A 3D transform with translation, rotation (Euler angles), and scale.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_translation(Vec3::new(0.0, 0.0, 5.0))
///     .rotate(Vec3::new(0.0, 0.1, 0.0))
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    translation: Vec3,
    rotation: Vec3, // Euler angles in radians around x, y, z
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (translation=0, rotation=0, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Vec3) -> &mut Self {
        self.translation = translation;
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.translation = self.translation + delta;
        self
    }

    /// Get the rotation (Euler angles in radians).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Add a delta rotation (Euler angles in radians).
    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation = self.rotation + delta;
        self
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    /// Generate the world matrix.
    ///
    /// Order: Translation * RotationZ * RotationY * RotationX * Scale
    /// (scale applied first, then X, Y, Z rotations, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.translation.x, self.translation.y, self.translation.z)
            * Mat4::rotation_z(self.rotation.z)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec4::Vec4;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.translation(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(t.to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_translation(Vec3::new(1.0, 2.0, 3.0))
            .rotate(Vec3::new(0.0, 0.5, 0.0))
            .set_scale_uniform(2.0);

        assert_eq!(t.translation(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y, 0.5);
        assert_eq!(t.scale(), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn scale_applies_before_rotation_and_translation() {
        let mut t = Transform::new();
        t.set_scale(Vec3::new(2.0, 1.0, 1.0))
            .set_rotation(Vec3::new(0.0, 0.0, FRAC_PI_2))
            .set_translation(Vec3::new(0.0, 0.0, 5.0));

        // (1,0,0) -> scaled (2,0,0) -> rotated about z (0,2,0) -> translated (0,2,5)
        let p = t.to_matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn x_rotation_applies_before_z_rotation() {
        let mut t = Transform::new();
        t.set_rotation(Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2));

        // (0,1,0) -> Rx -> (0,0,1) -> Rz leaves z alone
        let p = t.to_matrix() * Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-6);
    }
}
