//! First-person camera
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch angles. The renderer turns them into a
//! [`ViewTransform`](crate::transform::ViewTransform) once per frame.
//!
//! - **Yaw**: Rotation around Y-axis (horizontal look, positive = look right)
//! - **Pitch**: Rotation around X-axis (vertical look, positive = look up)
//!
//! Besides its pose the camera carries the lens: the focal length that scales
//! view-space coordinates into pixels and the near-clip threshold below which
//! whole faces are rejected.

use crate::math::vec3::Vec3;

pub const DEFAULT_FOCAL_LENGTH: f32 = 400.0;
pub const DEFAULT_NEAR_CLIP: f32 = 1.0;

/// First-person camera with position, yaw/pitch orientation and lens.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,   // Rotation around Y-axis (radians)
    pitch: f32, // Rotation around X-axis (radians)

    focal_length: f32,
    near_clip: f32,

    pitch_min: f32,
    pitch_max: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Creates a new camera at the given position, looking along +Z axis.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            focal_length: DEFAULT_FOCAL_LENGTH,
            near_clip: DEFAULT_NEAR_CLIP,
            pitch_min: -89.0_f32.to_radians(),
            pitch_max: 89.0_f32.to_radians(),
        }
    }

    /// Creates a camera at `position` looking toward `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self::new(position);
        camera.look_at(target);
        camera
    }

    /// Replaces the focal length and near-clip threshold.
    ///
    /// Non-positive values are ignored so the projection never divides by a
    /// depth that the near-plane test would let through at zero.
    pub fn with_lens(mut self, focal_length: f32, near_clip: f32) -> Self {
        if focal_length > 0.0 {
            self.focal_length = focal_length;
        }
        if near_clip > 0.0 {
            self.near_clip = near_clip;
        }
        self
    }

    // =========================================================================
    // Orientation - Rotation
    // =========================================================================

    /// Rotates the camera by yaw (horizontal) and pitch (vertical) deltas.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.rotate_yaw(yaw_delta);
        self.rotate_pitch(pitch_delta);
    }

    /// Rotates the camera horizontally (around Y-axis).
    /// Positive values rotate right, negative values rotate left.
    pub fn rotate_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(std::f32::consts::TAU);
    }

    /// Rotates the camera vertically (around X-axis).
    /// Positive values look up. Clamped to the pitch limits.
    pub fn rotate_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(self.pitch_min, self.pitch_max);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw.rem_euclid(std::f32::consts::TAU);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.pitch_min, self.pitch_max);
    }

    /// Points the camera at a world position.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        let horizontal_len = (direction.x * direction.x + direction.z * direction.z).sqrt();

        if horizontal_len > f32::EPSILON {
            self.set_yaw(direction.x.atan2(direction.z));
        }

        if direction.magnitude() > f32::EPSILON {
            self.set_pitch(direction.y.atan2(horizontal_len));
        }
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Moves the camera along its horizontal heading (ignores pitch).
    pub fn move_forward(&mut self, distance: f32) {
        self.position = self.position + self.heading() * distance;
    }

    /// Moves the camera along its right direction (strafe).
    pub fn move_right(&mut self, distance: f32) {
        self.position = self.position + self.right() * distance;
    }

    /// Moves the camera along the world up direction.
    pub fn move_up(&mut self, distance: f32) {
        self.position.y += distance;
    }

    /// Teleports the camera to a new position without changing orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Returns the yaw angle in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Returns the pitch angle in radians.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Distance from the eye to the projection plane, in pixels.
    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    /// View-space depth at or below which a vertex rejects its face.
    pub fn near_clip(&self) -> f32 {
        self.near_clip
    }

    /// Returns the camera's forward direction (normalized).
    pub fn forward(&self) -> Vec3 {
        Vec3::FORWARD.rotate_x(-self.pitch).rotate_y(self.yaw)
    }

    /// Forward direction projected on the ground plane.
    pub fn heading(&self) -> Vec3 {
        Vec3::FORWARD.rotate_y(self.yaw)
    }

    /// Returns the camera's right direction (normalized, always horizontal).
    pub fn right(&self) -> Vec3 {
        Vec3::RIGHT.rotate_y(self.yaw)
    }
}

// =============================================================================
// Camera Controller
// =============================================================================

/// Keyboard-driven camera movement.
///
/// Speeds are per frame, not per second: the application runs on a fixed
/// 60 FPS step and the controller does not scale by measured frame time.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Movement speed in world units per frame.
    pub move_speed: f32,
    /// Turn speed in radians per frame.
    pub turn_speed: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            turn_speed: 0.03,
        }
    }
}

impl CameraController {
    pub fn new(move_speed: f32, turn_speed: f32) -> Self {
        Self {
            move_speed,
            turn_speed,
        }
    }

    /// Applies one frame of input to the camera.
    ///
    /// # Input Mapping
    /// - W/S: Move forward/backward
    /// - A/D: Strafe left/right
    /// - Left/Right: Turn
    /// - Up/Down: Look up/down
    /// - Space/Shift: Move up/down
    pub fn update(&self, camera: &mut Camera, input: &crate::window::InputState) {
        let step = self.move_speed;

        if input.forward {
            camera.move_forward(step);
        }
        if input.back {
            camera.move_forward(-step);
        }
        if input.right {
            camera.move_right(step);
        }
        if input.left {
            camera.move_right(-step);
        }
        if input.up {
            camera.move_up(step);
        }
        if input.down {
            camera.move_up(-step);
        }

        if input.turn_left {
            camera.rotate_yaw(-self.turn_speed);
        }
        if input.turn_right {
            camera.rotate_yaw(self.turn_speed);
        }
        if input.look_up {
            camera.rotate_pitch(self.turn_speed);
        }
        if input.look_down {
            camera.rotate_pitch(-self.turn_speed);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
