//! SDL2 window, key handling and frame pacing.
//!
//! The window only presents finished frames: the engine's color buffer is
//! uploaded to a streaming ARGB8888 texture and copied to the canvas. The
//! window is fixed-size, so the engine's frustum never needs rebuilding.

use std::time::Duration;

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::controls::InputState;
use crate::engine::{CullMode, RenderMode};

/// Discrete events from one [`Window::poll_events`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    SetRenderMode(RenderMode),
    SetCullMode(CullMode),
}

/// Maps a pressed key to its window event, if it has one.
///
/// `1..6` pick render modes in [`RenderMode::ALL`] order, `C` enables and `X`
/// disables back-face culling, `Esc` quits.
pub fn key_event(keycode: Keycode) -> Option<WindowEvent> {
    let mode = |i: usize| Some(WindowEvent::SetRenderMode(RenderMode::ALL[i]));
    match keycode {
        Keycode::Escape => Some(WindowEvent::Quit),
        Keycode::Num1 => mode(0),
        Keycode::Num2 => mode(1),
        Keycode::Num3 => mode(2),
        Keycode::Num4 => mode(3),
        Keycode::Num5 => mode(4),
        Keycode::Num6 => mode(5),
        Keycode::C => Some(WindowEvent::SetCullMode(CullMode::BackFace)),
        Keycode::X => Some(WindowEvent::SetCullMode(CullMode::None)),
        _ => None,
    }
}

/// Sleeps to hold a target frame rate.
pub struct FrameLimiter {
    frame_time_ms: u64,
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, fps: u32) -> Self {
        Self {
            frame_time_ms: 1000 / u64::from(fps.max(1)),
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in seconds.
    /// Delta time represents the time elapsed since the last call to this method.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> f32 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if delta_time < self.frame_time_ms {
            std::thread::sleep(Duration::from_millis(self.frame_time_ms - delta_time));
            current_time = window.timer().ticks64();
            delta_time = current_time.saturating_sub(self.previous_frame_time);
        }

        self.previous_frame_time = current_time;
        delta_time as f32 / 1000.0
    }
}

pub struct Window {
    // Declared before `_texture_creator` so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    _texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated, never moved out of its box,
        // and outlives texture because of the field order above.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            texture,
            _texture_creator: texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drains pending SDL events into window events, in arrival order.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.event_pump
            .poll_iter()
            .filter_map(|event| match event {
                Event::Quit { .. } => Some(WindowEvent::Quit),
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => key_event(keycode),
                _ => None,
            })
            .collect()
    }

    /// Movement keys currently held down.
    pub fn input_state(&self) -> InputState {
        let keys = self.event_pump.keyboard_state();
        InputState {
            forward: keys.is_scancode_pressed(Scancode::W),
            back: keys.is_scancode_pressed(Scancode::S),
            turn_left: keys.is_scancode_pressed(Scancode::A),
            turn_right: keys.is_scancode_pressed(Scancode::D),
            look_up: keys.is_scancode_pressed(Scancode::Left),
            look_down: keys.is_scancode_pressed(Scancode::Right),
            rise: keys.is_scancode_pressed(Scancode::Up),
            sink: keys.is_scancode_pressed(Scancode::Down),
        }
    }

    /// Uploads an ARGB8888 frame of `width * height` pixels and shows it.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
