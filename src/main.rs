//! Interactive viewer.
//!
//! Usage:
//!   softpipe [config.json]
//!
//! Without a config file the built-in cube is shown with default settings.
//! Set `RUST_LOG=debug` to log mode changes, or `trace` for per-frame
//! pipeline counts.
//!
//! Keys:
//!   1..6       render mode (wireframe + vertices, wireframe, filled,
//!              filled + wireframe, textured, textured + wireframe)
//!   C / X      enable / disable back-face culling
//!   W / S      move forward / back
//!   A / D      turn left / right
//!   Left/Right pitch
//!   Up/Down    move up / down
//!   Esc        quit

use std::env;
use std::rc::Rc;

use anyhow::{anyhow, Context};
use softpipe::config::{self, MeshConfig, RenderConfig};
use softpipe::prelude::*;
use tracing::info;

fn load_config() -> anyhow::Result<RenderConfig> {
    match env::args().nth(1) {
        Some(path) => RenderConfig::from_file(&path)
            .with_context(|| format!("loading config from {path}")),
        None => Ok(RenderConfig::default()),
    }
}

fn load_mesh(mesh_config: &MeshConfig) -> anyhow::Result<Mesh> {
    let mut mesh = match &mesh_config.obj {
        Some(path) => Mesh::from_obj(path)
            .with_context(|| format!("loading mesh {}", path.display()))?,
        None => Mesh::cube(),
    };

    if let Some(path) = &mesh_config.texture {
        let texture = Texture::from_file(path)
            .with_context(|| format!("loading texture {}", path.display()))?;
        mesh.set_texture(Rc::new(texture));
    }

    mesh.transform_mut()
        .set_scale(config::vec3(mesh_config.scale))
        .set_rotation(config::vec3(mesh_config.rotation))
        .set_translation(config::vec3(mesh_config.translation));
    Ok(mesh)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = load_config()?;
    let scene = config.scene_meshes();
    let mut meshes = scene
        .iter()
        .map(load_mesh)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let spins: Vec<Vec3> = scene.iter().map(|m| config::vec3(m.spin)).collect();
    info!(meshes = meshes.len(), "scene loaded");

    let mut window = Window::new(
        &config.window.title,
        config.window.width,
        config.window.height,
    )
    .map_err(|e| anyhow!(e))
    .context("creating window")?;

    let mut engine = Engine::new(&config);
    let mut camera = Camera::default();
    let controller = CameraController::default();
    let mut limiter = FrameLimiter::new(&window, config.window.fps);

    'running: loop {
        let delta_time = limiter.wait_and_get_delta(&window);

        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::SetRenderMode(mode) => engine.set_render_mode(mode),
                WindowEvent::SetCullMode(mode) => engine.set_cull_mode(mode),
            }
        }

        controller.update(&mut camera, &window.input_state(), delta_time);

        for (mesh, spin) in meshes.iter_mut().zip(&spins) {
            mesh.transform_mut().rotate(*spin * delta_time);
        }

        engine
            .update(&meshes, &camera)
            .context("building frame geometry")?;
        engine.render();

        window
            .present(engine.frame_bytes())
            .map_err(|e| anyhow!(e))
            .context("presenting frame")?;
    }

    info!("shutting down");
    Ok(())
}
