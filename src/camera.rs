//! Camera state.
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! The camera only stores state. [`crate::controls::CameraController`] writes
//! it between frames and [`crate::engine::Engine::update`] reads it once per
//! frame to build the view matrix.

use crate::math::vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    direction: Vec3,
    forward_velocity: Vec3,
    yaw: f32,   // Rotation around Y-axis (radians)
    pitch: f32, // Rotation around X-axis (radians)
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Creates a camera at `position` looking along +Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            direction: Vec3::FORWARD,
            forward_velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
    }

    pub fn forward_velocity(&self) -> Vec3 {
        self.forward_velocity
    }

    pub fn set_forward_velocity(&mut self, forward_velocity: Vec3) {
        self.forward_velocity = forward_velocity;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }
}
