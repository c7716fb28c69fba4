//! Error types.
//!
//! Rendering itself only fails on capacity violations; asset and config
//! errors are raised by the loaders before any data reaches the pipeline.

use std::fmt;
use std::path::PathBuf;

/// Errors raised while building or rasterizing a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// More triangles were produced in one frame than the triangle buffer holds.
    TriangleCapacityExceeded { capacity: usize },
    /// A polygon grew past its fixed vertex capacity.
    PolygonCapacityExceeded { capacity: usize },
    /// A polygon was built from vertex and texcoord lists of different lengths.
    MismatchedPolygon { vertices: usize, texcoords: usize },
    /// Texture dimensions disagree with the pixel data.
    InvalidTexture {
        width: u32,
        height: u32,
        pixels: usize,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::TriangleCapacityExceeded { capacity } => {
                write!(f, "triangle buffer capacity of {capacity} exceeded")
            }
            RenderError::PolygonCapacityExceeded { capacity } => {
                write!(f, "polygon vertex capacity of {capacity} exceeded")
            }
            RenderError::MismatchedPolygon {
                vertices,
                texcoords,
            } => write!(
                f,
                "polygon has {vertices} vertices but {texcoords} texture coordinates"
            ),
            RenderError::InvalidTexture {
                width,
                height,
                pixels,
            } => write!(
                f,
                "texture of {width}x{height} cannot be built from {pixels} pixels"
            ),
        }
    }
}

impl std::error::Error for RenderError {}

/// Errors raised while loading meshes and textures from disk.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Obj(tobj::LoadError),
    Image(image::ImageError),
    Texture(RenderError),
    /// A face references a vertex or texture coordinate that does not exist.
    InvalidFace {
        face: usize,
        index: u32,
        available: usize,
    },
    /// The file parsed but contained no faces.
    Empty(PathBuf),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "io error: {e}"),
            LoadError::Obj(e) => write!(f, "obj error: {e}"),
            LoadError::Image(e) => write!(f, "image error: {e}"),
            LoadError::Texture(e) => write!(f, "{e}"),
            LoadError::InvalidFace {
                face,
                index,
                available,
            } => write!(
                f,
                "face {face} references index {index}, but only {available} entries exist"
            ),
            LoadError::Empty(path) => write!(f, "{} contains no faces", path.display()),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Obj(e) => Some(e),
            LoadError::Image(e) => Some(e),
            LoadError::Texture(e) => Some(e),
            LoadError::InvalidFace { .. } | LoadError::Empty(_) => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

impl From<image::ImageError> for LoadError {
    fn from(e: image::ImageError) -> Self {
        LoadError::Image(e)
    }
}

impl From<RenderError> for LoadError {
    fn from(e: RenderError) -> Self {
        LoadError::Texture(e)
    }
}

/// Errors raised while reading or validating a [`crate::config::RenderConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "io error: {e}"),
            ConfigError::Json(e) => write!(f, "json error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}
