//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    pub direction: Vec3,
    /// Brightness applied to faces that receive no direct light.
    pub ambient_intensity: f32,
    /// Multiplier for the diffuse lighting contribution (default: 1.0)
    pub diffuse_strength: f32,
}

impl Default for DirectionalLight {
    /// Light falling down and forward, as from a high sun behind the viewer.
    fn default() -> Self {
        Self::new(Vec3::new(0.3, -1.0, 0.5))
    }
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
            ambient_intensity: 0.35,
            diffuse_strength: 0.65,
        }
    }

    /// Diffuse term in [0.0, 1.0] for a world-space surface normal.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        // Negate direction: light pointing at surface = positive dot product
        (-self.direction).dot(normal.normalize()).max(0.0)
    }

    /// Ambient plus scaled diffuse, clamped to 1.0.
    pub fn brightness(&self, normal: Vec3) -> f32 {
        (self.ambient_intensity + self.diffuse_strength * self.intensity(normal)).min(1.0)
    }
}
