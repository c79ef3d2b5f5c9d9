//! Renderer configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change:
//!
//! ```toml
//! width = 1024
//! height = 768
//! fog = "quadratic"
//! render_mode = "filled"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::camera::{DEFAULT_FOCAL_LENGTH, DEFAULT_NEAR_CLIP};
use crate::colors;
use crate::context::RenderMode;
use crate::culling::CullMode;
use crate::error::ConfigError;
use crate::render::RasterizerType;
use crate::shading::{FogMode, ShadingMode};

pub const DEFAULT_MAX_VIEW_DISTANCE: f32 = 1500.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub focal_length: f32,
    pub near_clip: f32,
    /// Depth at which fog fully replaces a face's color.
    pub max_view_distance: f32,
    pub fog: FogMode,
    pub cull: CullMode,
    pub render_mode: RenderMode,
    pub rasterizer: RasterizerType,
    pub shading: ShadingMode,
    /// ARGB8888 outline color, before fog.
    pub outline_color: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            focal_length: DEFAULT_FOCAL_LENGTH,
            near_clip: DEFAULT_NEAR_CLIP,
            max_view_distance: DEFAULT_MAX_VIEW_DISTANCE,
            fog: FogMode::default(),
            cull: CullMode::default(),
            render_mode: RenderMode::default(),
            rasterizer: RasterizerType::default(),
            shading: ShadingMode::default(),
            outline_color: colors::OUTLINE,
        }
    }
}

impl RenderConfig {
    /// Loads and validates a `.toml` config file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("loaded render config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                field: "width/height",
                reason: format!("viewport {}x{} is empty", self.width, self.height),
            });
        }
        positive("focal_length", self.focal_length)?;
        positive("near_clip", self.near_clip)?;
        positive("max_view_distance", self.max_view_distance)?;
        if self.max_view_distance <= self.near_clip {
            return Err(ConfigError::Invalid {
                field: "max_view_distance",
                reason: format!(
                    "{} does not exceed near_clip {}",
                    self.max_view_distance, self.near_clip
                ),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive and finite, got {value}"),
        })
    }
}
