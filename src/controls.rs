//! Keyboard-driven camera movement.
//!
//! The window layer fills an [`InputState`] each frame; the
//! [`CameraController`] turns it into camera deltas scaled by delta time.

use crate::camera::Camera;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Which movement keys are held during the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub look_up: bool,
    pub look_down: bool,
    pub rise: bool,
    pub sink: bool,
}

/// Configuration and input handling for camera movement.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Movement speed along the view direction, in units per second.
    pub move_speed: f32,
    /// Vertical movement speed in units per second.
    pub climb_speed: f32,
    /// Yaw and pitch speed in radians per second.
    pub turn_speed: f32,
    pitch_limit: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            climb_speed: 3.0,
            turn_speed: 1.0,
            pitch_limit: 89.0_f32.to_radians(),
        }
    }
}

impl CameraController {
    pub fn new(move_speed: f32, turn_speed: f32) -> Self {
        Self {
            move_speed,
            turn_speed,
            ..Self::default()
        }
    }

    /// Applies one frame of input to the camera.
    ///
    /// # Input Mapping
    /// - W/S: Move forward/backward along the view direction
    /// - A/D: Yaw left/right
    /// - Left/Right arrows: Pitch up/down (clamped to ±89°)
    /// - Up/Down arrows: Move up/down along world Y
    pub fn update(&self, camera: &mut Camera, input: &InputState, delta_time: f32) {
        let turn = self.turn_speed * delta_time;
        if input.turn_left {
            camera.set_yaw(camera.yaw() - turn);
        }
        if input.turn_right {
            camera.set_yaw(camera.yaw() + turn);
        }
        if input.look_up {
            camera.set_pitch((camera.pitch() - turn).max(-self.pitch_limit));
        }
        if input.look_down {
            camera.set_pitch((camera.pitch() + turn).min(self.pitch_limit));
        }

        let direction = view_direction(camera.yaw(), camera.pitch());
        camera.set_direction(direction);

        let velocity = direction * (self.move_speed * delta_time);
        camera.set_forward_velocity(velocity);
        if input.forward {
            camera.set_position(camera.position() + velocity);
        }
        if input.back {
            camera.set_position(camera.position() - velocity);
        }

        let climb = self.climb_speed * delta_time;
        if input.rise {
            camera.set_position(camera.position() + Vec3::UP * climb);
        }
        if input.sink {
            camera.set_position(camera.position() - Vec3::UP * climb);
        }
    }
}

/// Rotates +Z by pitch, then yaw: `Ry(yaw) * Rx(pitch) * (0, 0, 1)`.
pub fn view_direction(yaw: f32, pitch: f32) -> Vec3 {
    let rotation = Mat4::rotation_y(yaw) * Mat4::rotation_x(pitch);
    (rotation * Vec4::from_vec3(Vec3::FORWARD)).to_vec3()
}
