//! Configuration system.
//!
//! Loads render and scene configuration from JSON. Every field has a default,
//! so `{}` is valid and shows the built-in cube.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::colors;
use crate::engine::{CullMode, RenderMode};
use crate::error::ConfigError;
use crate::math::vec3::Vec3;

/// Root configuration for the renderer binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub window: WindowConfig,
    pub projection: ProjectionConfig,
    /// Direction the light points in, view space. The light turns with the camera.
    pub light_direction: [f32; 3],
    pub render_mode: RenderMode,
    pub cull_mode: CullMode,
    /// Capacity of the per-frame triangle list.
    pub max_triangles: usize,
    /// ARGB color the frame is cleared to.
    pub background_color: u32,
    pub grid: GridConfig,
    /// Meshes to load. Empty means a single built-in cube.
    pub meshes: Vec<MeshConfig>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            projection: ProjectionConfig::default(),
            light_direction: [0.0, 0.0, 1.0],
            render_mode: RenderMode::default(),
            cull_mode: CullMode::default(),
            max_triangles: 10_000,
            background_color: colors::BACKGROUND,
            grid: GridConfig::default(),
            meshes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Target frames per second.
    pub fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "softpipe".to_string(),
            width: 800,
            height: 600,
            fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            z_near: 1.0,
            z_far: 20.0,
        }
    }
}

/// Dotted background grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub enabled: bool,
    pub spacing: u32,
    pub color: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spacing: 10,
            color: colors::GRID,
        }
    }
}

/// One mesh in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// OBJ file to load. `None` uses the built-in cube.
    pub obj: Option<PathBuf>,
    /// Texture image for the mesh.
    pub texture: Option<PathBuf>,
    pub scale: [f32; 3],
    /// Euler angles in radians.
    pub rotation: [f32; 3],
    pub translation: [f32; 3],
    /// Rotation speed per axis in radians per second.
    pub spin: [f32; 3],
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            obj: None,
            texture: None,
            scale: [1.0, 1.0, 1.0],
            rotation: [0.0, 0.0, 0.0],
            translation: [0.0, 0.0, 5.0],
            spin: [0.0, 0.0, 0.0],
        }
    }
}

/// Converts a config triple to a vector.
pub fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

impl RenderConfig {
    /// Parses and validates config from JSON.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// The meshes to load, with the built-in cube standing in for an empty list.
    pub fn scene_meshes(&self) -> Vec<MeshConfig> {
        if self.meshes.is_empty() {
            vec![MeshConfig::default()]
        } else {
            self.meshes.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let window = &self.window;
        if window.width == 0 || window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-zero, got {}x{}",
                window.width, window.height
            )));
        }
        if window.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".to_string()));
        }

        let projection = &self.projection;
        if !(projection.fov_y_degrees.is_finite()
            && projection.fov_y_degrees > 0.0
            && projection.fov_y_degrees < 180.0)
        {
            return Err(ConfigError::Invalid(format!(
                "fov_y_degrees must be in (0, 180), got {}",
                projection.fov_y_degrees
            )));
        }
        if !(projection.z_near.is_finite() && projection.z_near > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "z_near must be positive, got {}",
                projection.z_near
            )));
        }
        if !(projection.z_far.is_finite() && projection.z_far > projection.z_near) {
            return Err(ConfigError::Invalid(format!(
                "z_far ({}) must be greater than z_near ({})",
                projection.z_far, projection.z_near
            )));
        }
        if projection.z_near < 1.0 {
            warn!(
                z_near = projection.z_near,
                "z_near below 1 puts near depth values below zero"
            );
        }

        if self.max_triangles == 0 {
            return Err(ConfigError::Invalid(
                "max_triangles must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = RenderConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.projection.z_far, 20.0);
        assert_eq!(config.max_triangles, 10_000);
        assert_eq!(config.render_mode, RenderMode::Textured);
        assert_eq!(config.cull_mode, CullMode::BackFace);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let json = r#"{
            "window": { "width": 320 },
            "render_mode": "filled_wireframe",
            "cull_mode": "none",
            "meshes": [ { "obj": "assets/f22.obj", "spin": [0.0, 1.0, 0.0] } ]
        }"#;
        let config = RenderConfig::from_json_str(json).unwrap();
        assert_eq!(config.window.width, 320);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.render_mode, RenderMode::FilledWireframe);
        assert_eq!(config.cull_mode, CullMode::None);

        let mesh = &config.meshes[0];
        assert_eq!(mesh.obj.as_deref(), Some(Path::new("assets/f22.obj")));
        assert_eq!(mesh.spin, [0.0, 1.0, 0.0]);
        assert_eq!(mesh.translation, [0.0, 0.0, 5.0]);
    }

    #[test]
    fn empty_mesh_list_means_one_cube() {
        let meshes = RenderConfig::default().scene_meshes();
        assert_eq!(meshes.len(), 1);
        assert!(meshes[0].obj.is_none());
    }

    #[test]
    fn invalid_planes_are_rejected() {
        let err = RenderConfig::from_json_str(r#"{ "projection": { "z_near": 0.0 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));

        let err = RenderConfig::from_json_str(
            r#"{ "projection": { "z_near": 5.0, "z_far": 2.0 } }"#,
        );
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_viewport_and_capacity_are_rejected() {
        let err = RenderConfig::from_json_str(r#"{ "window": { "height": 0 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));

        let err = RenderConfig::from_json_str(r#"{ "max_triangles": 0 }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = RenderConfig::from_json_str("{ not json");
        assert!(matches!(err, Err(ConfigError::Json(_))));
    }

    #[test]
    fn unknown_render_mode_is_rejected() {
        let err = RenderConfig::from_json_str(r#"{ "render_mode": "raytraced" }"#);
        assert!(matches!(err, Err(ConfigError::Json(_))));
    }
}
