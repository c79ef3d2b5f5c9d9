//! A CPU software renderer for flat-colored polyhedral scenes.
//!
//! Meshes are built procedurally from boxes, pyramids, prisms and ramps,
//! transformed into camera space, near-rejected and back-face culled a whole
//! face at a time, projected, sorted far to near and filled with the
//! painter's algorithm. There is no depth buffer. SDL2 is used only to show
//! the finished frame.
//!
//! # Quick Start
//!
//! ```ignore
//! use blockfill::prelude::*;
//!
//! let mut mesh = Mesh::new(Vec3::new(0.0, 0.0, 200.0), 0.0);
//! add_box(&mut mesh, 40.0, 40.0, 40.0, Vec3::ZERO, colors::BRICK)?;
//!
//! let mut context = RenderContext::new(&RenderConfig::default());
//! let frame = context.render_frame(&Camera::default(), [&mesh], colors::SKY);
//! frame.save_png("box.png")?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod context;
pub mod culling;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod scene;
pub mod shading;
pub mod sorting;
pub mod transform;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use config::RenderConfig;
pub use context::{Frame, FrameStats, RenderContext, RenderMode};
pub use error::{BuildError, ConfigError};
pub use mesh::{build_mesh, Mesh, Shape};
pub use render::{RasterizerType, RenderItem};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use blockfill::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, CameraController};

    // Rendering
    pub use crate::config::RenderConfig;
    pub use crate::context::{Frame, FrameStats, RenderContext, RenderMode};
    pub use crate::culling::CullMode;
    pub use crate::render::RasterizerType;
    pub use crate::shading::{FogMode, ShadingMode};

    // Geometry
    pub use crate::colors;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::mesh::{add_box, add_prism, add_pyramid, add_ramp, build_mesh, Mesh, Shape};
    pub use crate::scene::{EntityId, MeshPool};

    // Window & Input
    pub use crate::window::{FpsCounter, FrameLimiter, InputState, Key, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        fill_polygon, EdgeFunctionRasterizer, FrameBuffer, Rasterizer, ScanlineRasterizer,
        Triangle,
    };
}
