//! Lighting types for the renderer.

use crate::colors;
use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// All rays are parallel, as for a distant source like the sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::FORWARD)
    }
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction is normalized; a zero vector stays zero and lights nothing.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
        }
    }

    /// Flat-shading intensity for a face with unit `normal`.
    ///
    /// Positive when the face points back toward the light. Not clamped here;
    /// [`DirectionalLight::shade`] clamps when applying it.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        -self.direction.dot(normal)
    }

    /// Scales `color` by the intensity for `normal`, clamped to `[0, 1]`.
    pub fn shade(&self, color: u32, normal: Vec3) -> u32 {
        colors::apply_intensity(color, self.intensity(normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn facing_the_light_is_fully_lit() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0));
        let normal = Vec3::new(0.0, 0.0, -1.0);
        assert_relative_eq!(light.intensity(normal), 1.0);
        assert_eq!(light.shade(colors::RED, normal), colors::RED);
    }

    #[test]
    fn facing_away_goes_black() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0));
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(light.intensity(normal), -1.0);
        assert_eq!(light.shade(colors::WHITE, normal), colors::BACKGROUND);
    }

    #[test]
    fn angled_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0));
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert_relative_eq!(light.intensity(normal), 0.70710677, epsilon = 1e-5);
    }

    #[test]
    fn direction_is_normalized() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(light.direction.length(), 1.0);
        assert_eq!(DirectionalLight::default().direction, Vec3::FORWARD);
    }
}
