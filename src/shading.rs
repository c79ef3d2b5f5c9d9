//! Face color resolution: optional directional shading, then depth fog.
//!
//! By default faces keep their flat build color and only fog varies with
//! depth; normals are used for culling alone. [`ShadingMode::Directional`]
//! additionally scales the color by a [`DirectionalLight`] evaluated on the
//! world-space normal.

use serde::Deserialize;

use crate::colors;
use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;

/// How the fog factor grows with depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FogMode {
    Off,
    /// `t = clamp(depth / max_distance, 0, 1)`
    #[default]
    Linear,
    /// `t = clamp(depth / max_distance, 0, 1)²`, clearer near the camera.
    Quadratic,
}

/// Depth fog toward the frame's background color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub mode: FogMode,
    /// Depth at which a face takes on the background color entirely.
    pub max_distance: f32,
}

impl Fog {
    pub fn new(mode: FogMode, max_distance: f32) -> Self {
        Self { mode, max_distance }
    }

    /// Blend factor in [0, 1] for a view-space depth.
    pub fn factor(&self, depth: f32) -> f32 {
        if self.max_distance <= 0.0 {
            return 0.0;
        }
        let t = (depth / self.max_distance).clamp(0.0, 1.0);
        match self.mode {
            FogMode::Off => 0.0,
            FogMode::Linear => t,
            FogMode::Quadratic => t * t,
        }
    }

    /// Blends `color` toward `background` according to `depth`.
    pub fn apply(&self, color: u32, depth: f32, background: u32) -> u32 {
        colors::blend(color, background, self.factor(depth))
    }
}

/// Whether face normals contribute to face color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// Flat build color, fog only.
    #[default]
    Flat,
    /// Flat color scaled by a directional light on the world-space normal.
    Directional,
}

/// Per-frame color resolution settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shader {
    pub mode: ShadingMode,
    pub light: DirectionalLight,
    pub fog: Fog,
}

impl Shader {
    /// Resolves the fill color of a face.
    pub fn shade(&self, color: u32, world_normal: Vec3, depth: f32, background: u32) -> u32 {
        let lit = match self.mode {
            ShadingMode::Flat => color,
            ShadingMode::Directional => colors::scale(color, self.light.brightness(world_normal)),
        };
        self.fog.apply(lit, depth, background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_fog_is_clamped_ratio() {
        let fog = Fog::new(FogMode::Linear, 100.0);
        assert_relative_eq!(fog.factor(0.0), 0.0);
        assert_relative_eq!(fog.factor(25.0), 0.25);
        assert_relative_eq!(fog.factor(100.0), 1.0);
        assert_relative_eq!(fog.factor(1000.0), 1.0);
    }

    #[test]
    fn quadratic_fog_is_squared_and_monotonic() {
        let fog = Fog::new(FogMode::Quadratic, 100.0);
        assert_relative_eq!(fog.factor(50.0), 0.25);
        let mut previous = 0.0;
        for depth in (0..=120).map(|d| d as f32) {
            let factor = fog.factor(depth);
            assert!(factor >= previous);
            previous = factor;
        }
    }

    #[test]
    fn fog_reaches_background_at_max_distance() {
        let fog = Fog::new(FogMode::Linear, 100.0);
        assert_eq!(fog.apply(colors::BRICK, 150.0, colors::SKY), colors::SKY);
        assert_eq!(fog.apply(colors::BRICK, 0.0, colors::SKY), colors::BRICK);
    }

    #[test]
    fn fog_off_keeps_color() {
        let fog = Fog::new(FogMode::Off, 100.0);
        assert_eq!(fog.apply(colors::BRICK, 90.0, colors::SKY), colors::BRICK);
    }

    #[test]
    fn flat_shading_ignores_normal() {
        let shader = Shader {
            mode: ShadingMode::Flat,
            light: DirectionalLight::default(),
            fog: Fog::new(FogMode::Off, 100.0),
        };
        let up = shader.shade(colors::STONE, Vec3::UP, 10.0, colors::SKY);
        let down = shader.shade(colors::STONE, -Vec3::UP, 10.0, colors::SKY);
        assert_eq!(up, down);
    }

    #[test]
    fn directional_shading_darkens_faces_turned_away() {
        let shader = Shader {
            mode: ShadingMode::Directional,
            light: DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0)),
            fog: Fog::new(FogMode::Off, 100.0),
        };
        let lit = colors::unpack_color(shader.shade(0xFFFFFFFF, Vec3::UP, 10.0, 0));
        let unlit = colors::unpack_color(shader.shade(0xFFFFFFFF, -Vec3::UP, 10.0, 0));
        assert!(lit.0 > unlit.0);
    }
}
