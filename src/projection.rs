//! Perspective projection onto the screen.
//!
//! [`Projection`] combines the camera lens (focal length, near clip) with the
//! viewport size for one frame. It maps a view-space point to pixels with
//!
//! ```text
//! screen_x = half_width  + view_x * (focal_length / view_z)
//! screen_y = half_height - view_y * (focal_length / view_z)
//! ```
//!
//! Screen y grows downward while view y grows upward, hence the minus sign.
//! Points at or in front of the near clip are refused before the division.

use crate::camera::Camera;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Perspective projection parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    focal_length: f32,
    near_clip: f32,
    half_width: f32,
    half_height: f32,
}

impl Projection {
    /// Creates a projection for a `width` x `height` pixel viewport.
    ///
    /// `near_clip` must be > 0 so that every accepted depth is a safe divisor.
    pub fn new(focal_length: f32, near_clip: f32, width: u32, height: u32) -> Self {
        debug_assert!(near_clip > 0.0, "near clip must be positive");
        Self {
            focal_length,
            near_clip,
            half_width: width as f32 / 2.0,
            half_height: height as f32 / 2.0,
        }
    }

    /// Uses the lens of `camera` for a viewport of the given size.
    pub fn for_camera(camera: &Camera, width: u32, height: u32) -> Self {
        Self::new(camera.focal_length(), camera.near_clip(), width, height)
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    pub fn near_clip(&self) -> f32 {
        self.near_clip
    }

    /// Returns true if a view-space depth passes the near-plane test.
    #[inline]
    pub fn in_front(&self, depth: f32) -> bool {
        depth > self.near_clip
    }

    /// Pixels per world unit at the given view-space depth.
    ///
    /// Returns `None` for depths that fail the near-plane test.
    pub fn scale_at(&self, depth: f32) -> Option<f32> {
        self.in_front(depth).then(|| self.focal_length / depth)
    }

    /// Projects a view-space point to screen coordinates.
    ///
    /// Returns `None` if the point is at or behind the near clip.
    #[inline]
    pub fn project(&self, view: Vec3) -> Option<Vec2> {
        let scale = self.scale_at(view.z)?;
        Some(Vec2::new(
            self.half_width + view.x * scale,
            self.half_height - view.y * scale,
        ))
    }
}
