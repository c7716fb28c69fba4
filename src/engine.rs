//! Core rendering engine.
//!
//! The [`Engine`] is an explicit render context: it owns the frame buffers, the
//! per-frame triangle list and everything derived from the projection. A frame
//! is two calls:
//!
//! 1. [`Engine::update`] runs the geometry pipeline for every mesh face
//!    (world and view transform, back-face culling, frustum clipping, fan
//!    triangulation, projection, flat lighting) and fills the triangle list.
//! 2. [`Engine::render`] clears the buffers and rasterizes that list
//!    according to the active [`RenderMode`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::camera::Camera;
use crate::clipper::{FrustumPlanes, Polygon};
use crate::colors;
use crate::config::{self, GridConfig, RenderConfig};
use crate::error::RenderError;
use crate::light::DirectionalLight;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::render::{
    draw_filled_triangle, draw_textured_triangle, FrameBuffer, Triangle, TriangleBuffer,
};

/// Rendering mode presets, in key order `1..6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Wireframe + vertices (key: 1)
    WireframeVertices,
    /// Wireframe only (key: 2)
    Wireframe,
    /// Filled only (key: 3)
    Filled,
    /// Filled + wireframe (key: 4)
    FilledWireframe,
    /// Textured only (key: 5)
    #[default]
    Textured,
    /// Textured + wireframe (key: 6)
    TexturedWireframe,
}

impl RenderMode {
    pub const ALL: [RenderMode; 6] = [
        RenderMode::WireframeVertices,
        RenderMode::Wireframe,
        RenderMode::Filled,
        RenderMode::FilledWireframe,
        RenderMode::Textured,
        RenderMode::TexturedWireframe,
    ];

    /// Resolves the mode into the passes a frame runs.
    pub fn plan(self) -> RenderPlan {
        let (fill, wireframe, vertices) = match self {
            RenderMode::WireframeVertices => (None, true, true),
            RenderMode::Wireframe => (None, true, false),
            RenderMode::Filled => (Some(FillKind::Flat), false, false),
            RenderMode::FilledWireframe => (Some(FillKind::Flat), true, false),
            RenderMode::Textured => (Some(FillKind::Textured), false, false),
            RenderMode::TexturedWireframe => (Some(FillKind::Textured), true, false),
        };
        RenderPlan {
            fill,
            wireframe,
            vertices,
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RenderMode::WireframeVertices => "wireframe + vertices",
            RenderMode::Wireframe => "wireframe",
            RenderMode::Filled => "filled",
            RenderMode::FilledWireframe => "filled + wireframe",
            RenderMode::Textured => "textured",
            RenderMode::TexturedWireframe => "textured + wireframe",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    None,
    #[default]
    BackFace,
}

/// How triangle interiors are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    /// Flat-lit face color.
    Flat,
    /// Texture samples; triangles without a texture fall back to [`FillKind::Flat`].
    Textured,
}

/// The passes one frame runs, resolved once from the [`RenderMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPlan {
    pub fill: Option<FillKind>,
    pub wireframe: bool,
    pub vertices: bool,
}

/// Counters from one [`Engine::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Faces visited across all meshes.
    pub faces: usize,
    /// Faces dropped by back-face culling.
    pub culled: usize,
    /// Faces clipped away entirely by the frustum.
    pub clipped: usize,
    /// Triangles queued for rasterization.
    pub triangles: usize,
}

const VERTEX_MARKER_SIZE: i32 = 6;

pub struct Engine {
    framebuffer: FrameBuffer,
    triangles: TriangleBuffer,
    projection: Projection,
    projection_matrix: Mat4,
    frustum: FrustumPlanes,
    light: DirectionalLight,
    render_mode: RenderMode,
    cull_mode: CullMode,
    background_color: u32,
    grid: GridConfig,
}

impl Engine {
    pub fn new(config: &RenderConfig) -> Self {
        let width = config.window.width;
        let height = config.window.height;
        let aspect_ratio = width as f32 / height as f32;
        let projection = Projection::from_degrees(
            config.projection.fov_y_degrees,
            aspect_ratio,
            config.projection.z_near,
            config.projection.z_far,
        );

        info!(
            width,
            height,
            fov_y = config.projection.fov_y_degrees,
            z_near = projection.z_near(),
            z_far = projection.z_far(),
            max_triangles = config.max_triangles,
            "engine initialized"
        );

        Self {
            framebuffer: FrameBuffer::new(width, height),
            triangles: TriangleBuffer::new(config.max_triangles),
            projection_matrix: projection.matrix(),
            frustum: projection.frustum_planes(),
            projection,
            light: DirectionalLight::new(config::vec3(config.light_direction)),
            render_mode: config.render_mode,
            cull_mode: config.cull_mode,
            background_color: config.background_color,
            grid: config.grid.clone(),
        }
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        if mode != self.render_mode {
            debug!(%mode, "render mode changed");
        }
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        if mode != self.cull_mode {
            debug!(?mode, "cull mode changed");
        }
        self.cull_mode = mode;
    }

    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Triangles produced by the last [`Engine::update`].
    pub fn triangles(&self) -> &TriangleBuffer {
        &self.triangles
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_bytes(&self) -> &[u8] {
        self.framebuffer.as_bytes()
    }

    /// Runs the geometry pipeline and rebuilds the triangle list.
    ///
    /// Fails if the frame needs more triangles than the configured capacity
    /// or a clipped polygon outgrows its vertex bound. The triangle list then
    /// holds whatever was queued before the failure.
    pub fn update(&mut self, meshes: &[Mesh], camera: &Camera) -> Result<FrameStats, RenderError> {
        self.triangles.clear();

        let eye = camera.position();
        let view_matrix = Mat4::look_at(eye, eye + camera.direction(), Vec3::UP);
        let width = self.framebuffer.width();
        let height = self.framebuffer.height();
        let mut stats = FrameStats::default();

        for mesh in meshes {
            let world_matrix = mesh.transform().to_matrix();
            let vertices = mesh.vertices();
            let texcoords = mesh.texcoords();

            for face in mesh.faces() {
                stats.faces += 1;

                // Model space -> world space -> view space
                let points = face.vertex_indices().map(|i| {
                    let world = world_matrix * Vec4::from_vec3(vertices[i]);
                    (view_matrix * world).to_vec3()
                });

                let [a, b, c] = points;
                let normal = (b - a).normalize().cross((c - a).normalize()).normalize();

                if self.cull_mode == CullMode::BackFace {
                    // In view space the camera sits at the origin
                    let camera_ray = Vec3::ZERO - a;
                    if normal.dot(camera_ray) < 0.0 {
                        stats.culled += 1;
                        continue;
                    }
                }

                let mut polygon =
                    Polygon::from_triangle(points, face.texcoord_indices().map(|i| texcoords[i]));
                self.frustum.clip_polygon(&mut polygon)?;
                if polygon.len() < 3 {
                    stats.clipped += 1;
                    continue;
                }

                let color = self.light.shade(face.color, normal);

                for triangle in polygon.triangulate() {
                    let points = triangle.points.map(|p| {
                        Projection::to_screen(self.projection_matrix.project(p), width, height)
                    });
                    self.triangles.push(
                        Triangle { points, ..triangle }
                            .with_color(color)
                            .with_texture(mesh.texture().cloned()),
                    )?;
                    stats.triangles += 1;
                }
            }
        }

        trace!(
            faces = stats.faces,
            culled = stats.culled,
            clipped = stats.clipped,
            triangles = stats.triangles,
            "frame geometry"
        );
        Ok(stats)
    }

    /// Clears the buffers and rasterizes the triangles from the last update.
    pub fn render(&mut self) {
        let plan = self.render_mode.plan();
        let framebuffer = &mut self.framebuffer;

        framebuffer.clear(self.background_color);
        framebuffer.clear_depth();

        if self.grid.enabled {
            framebuffer.draw_grid(self.grid.spacing, self.grid.color);
        }

        if let Some(kind) = plan.fill {
            for triangle in &self.triangles {
                match (kind, triangle.texture.as_deref()) {
                    (FillKind::Textured, Some(texture)) => {
                        draw_textured_triangle(framebuffer, triangle, texture)
                    }
                    _ => draw_filled_triangle(framebuffer, triangle, triangle.color),
                }
            }
        }

        // Overlays go on top of everything, without depth testing
        for triangle in &self.triangles {
            let [a, b, c] = triangle.points;
            if plan.wireframe {
                for (from, to) in [(a, b), (b, c), (c, a)] {
                    framebuffer.draw_line(
                        from.x as i32,
                        from.y as i32,
                        to.x as i32,
                        to.y as i32,
                        colors::WIREFRAME,
                    );
                }
            }
            if plan.vertices {
                for point in [a, b, c] {
                    framebuffer.draw_rect(
                        point.x as i32 - VERTEX_MARKER_SIZE / 2,
                        point.y as i32 - VERTEX_MARKER_SIZE / 2,
                        VERTEX_MARKER_SIZE,
                        VERTEX_MARKER_SIZE,
                        colors::VERTEX,
                    );
                }
            }
        }
    }
}
