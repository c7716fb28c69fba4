//! A CPU-based software-rendered 3D graphics pipeline.
//!
//! Meshes are transformed, back-face culled, clipped against the view
//! frustum, projected and rasterized with a depth buffer, all on the CPU.
//! SDL2 is used only to show the finished color buffer.
//!
//! # Quick Start
//!
//! ```ignore
//! use softpipe::prelude::*;
//!
//! let config = RenderConfig::default();
//! let mut engine = Engine::new(&config);
//! let mut cube = Mesh::cube();
//! cube.transform_mut().set_translation(Vec3::new(0.0, 0.0, 5.0));
//!
//! engine.update(&[cube], &Camera::default())?;
//! engine.render();
//! let pixels: &[u8] = engine.frame_bytes();
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod texture;
pub mod transform;
pub mod window;

// Pipeline internals
pub mod clipper;
pub mod render;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use config::RenderConfig;
pub use engine::{CullMode, Engine, FrameStats, RenderMode};
pub use error::{ConfigError, LoadError, RenderError};
pub use mesh::Mesh;
pub use projection::Projection;
pub use texture::Texture;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softpipe::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::Camera;
    pub use crate::controls::{CameraController, InputState};

    // Engine
    pub use crate::config::RenderConfig;
    pub use crate::engine::{CullMode, Engine, FrameStats, RenderMode};

    // Scene
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::Mesh;
    pub use crate::projection::Projection;
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Window & Input
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::rasterizer::{rasterize, FlatShader, ScreenVertex, TextureShader};
    pub use crate::render::{
        draw_filled_triangle, draw_textured_triangle, FrameBuffer, Triangle, TriangleBuffer,
    };
}
