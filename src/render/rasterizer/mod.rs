//! Polygon rasterization algorithms.
//!
//! This module provides multiple rasterizer implementations that can be
//! swapped at runtime for testing and benchmarking purposes.
//!
//! Available algorithms:
//! - [`ScanlineRasterizer`]: Flat-top/flat-bottom triangle decomposition
//! - [`EdgeFunctionRasterizer`]: Bounding box iteration with edge function tests
//!
//! Faces reach the rasterizer as convex polygons of 3 or more points. They
//! are filled as a triangle fan around the first point by [`fill_polygon`].

mod edgefunction;
mod scanline;

pub use edgefunction::EdgeFunctionRasterizer;
pub use scanline::ScanlineRasterizer;

use serde::Deserialize;

use super::framebuffer::FrameBuffer;
use crate::math::vec2::Vec2;

/// A triangle ready for rasterization in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec2; 3],
}

impl Triangle {
    pub fn new(points: [Vec2; 3]) -> Self {
        Self { points }
    }
}

/// Trait for triangle rasterization algorithms.
///
/// Implementors define how triangles are filled into a pixel buffer.
/// This allows swapping between different rasterization strategies
/// (scanline, edge functions, etc.) for testing and benchmarking.
pub trait Rasterizer {
    /// Fill a triangle into the frame buffer with a flat color.
    ///
    /// Vertices may be given in either winding order.
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, color: u32);
}

/// Fills a convex polygon as a fan of triangles sharing `points[0]`.
///
/// Polygons with fewer than three points draw nothing.
pub fn fill_polygon<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    points: &[Vec2],
    buffer: &mut FrameBuffer,
    color: u32,
) {
    if points.len() < 3 {
        return;
    }
    let anchor = points[0];
    for pair in points[1..].windows(2) {
        let triangle = Triangle::new([anchor, pair[0], pair[1]]);
        rasterizer.fill_triangle(&triangle, buffer, color);
    }
}

/// Available rasterization algorithms.
///
/// Use this enum to select which rasterizer the render context should use.
/// Can be changed at runtime via `RenderContext::set_rasterizer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RasterizerType {
    /// Scanline rasterizer using flat-top/flat-bottom triangle decomposition.
    /// Generally faster for larger triangles due to efficient horizontal span filling.
    #[default]
    Scanline,
    /// Edge function rasterizer that tests each pixel in the bounding box.
    /// Simpler algorithm, forms the basis for GPU rasterization.
    EdgeFunction,
}

impl std::fmt::Display for RasterizerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterizerType::Scanline => write!(f, "Scanline"),
            RasterizerType::EdgeFunction => write!(f, "EdgeFunction"),
        }
    }
}

/// Internal dispatcher that holds both rasterizer implementations.
#[derive(Debug)]
pub struct RasterizerDispatcher {
    scanline: ScanlineRasterizer,
    edge_function: EdgeFunctionRasterizer,
    active: RasterizerType,
}

impl RasterizerDispatcher {
    pub fn new(rasterizer_type: RasterizerType) -> Self {
        Self {
            scanline: ScanlineRasterizer::new(),
            edge_function: EdgeFunctionRasterizer::new(),
            active: rasterizer_type,
        }
    }

    pub fn set_type(&mut self, rasterizer_type: RasterizerType) {
        self.active = rasterizer_type;
    }

    pub fn active_type(&self) -> RasterizerType {
        self.active
    }
}

impl Rasterizer for RasterizerDispatcher {
    #[inline]
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, color: u32) {
        match self.active {
            RasterizerType::Scanline => self.scanline.fill_triangle(triangle, buffer, color),
            RasterizerType::EdgeFunction => {
                self.edge_function.fill_triangle(triangle, buffer, color)
            }
        }
    }
}
