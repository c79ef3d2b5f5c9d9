//! Rendering internals: pixel buffers, polygon fill and line drawing.
//!
//! The pipeline hands this layer a depth-sorted list of [`RenderItem`]s; each
//! one is filled and/or outlined in list order, so later items overdraw
//! earlier ones.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{
    fill_polygon, EdgeFunctionRasterizer, Rasterizer, RasterizerDispatcher, RasterizerType,
    ScanlineRasterizer, Triangle,
};
pub use renderer::Renderer;

use crate::math::vec2::Vec2;

/// One visible face, projected and colored, ready to draw.
///
/// Created fresh every frame and discarded after rasterization.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem {
    /// Screen-space polygon in the face's original winding order.
    pub points: Vec<Vec2>,
    /// Mean view-space depth of the face's vertices.
    pub depth: f32,
    /// Resolved fill color.
    pub color: u32,
    /// Resolved outline color.
    pub outline: u32,
}
