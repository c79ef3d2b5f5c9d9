//! Scanline-based triangle rasterization.
//!
//! This module implements triangle rasterization using the classic scanline algorithm
//! with flat-top/flat-bottom triangle decomposition. This approach was widely used
//! in early software renderers and remains an efficient choice for CPU-based rendering.
//!
//! # Algorithm Overview
//!
//! The scanline algorithm processes triangles one horizontal line at a time:
//!
//! 1. **Sort vertices** by Y coordinate (top to bottom in screen space)
//! 2. **Decompose** the triangle into simpler shapes (flat-top and/or flat-bottom)
//! 3. **Rasterize** each scanline by computing left/right edge intersections
//!
//! # Triangle Decomposition
//!
//! ```text
//!        v0                   v0
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>      /----\<- split at v1.y
//!     /      \             v1   split
//!    /________\             \    /
//!   v1        v2             \  /
//!                             \/
//!                             v2
//!
//!   General triangle      Flat-bottom (top) + Flat-top (bottom)
//! ```
//!
//! # Inverse Slope Method
//!
//! For each scanline we track the X position along the left and right edges
//! with `x = x_start + inv_slope * (y - y_start)`, where
//! `inv_slope = (x_end - x_start) / (y_end - y_start)`.
//!
//! Rows are clamped to the buffer before iterating, so polygons that project
//! far outside the viewport cost no more than the rows they cover on screen.

use super::{Rasterizer, Triangle};
use crate::math::vec2::Vec2;
use crate::render::framebuffer::FrameBuffer;

/// Scanline-based triangle rasterizer.
///
/// # Characteristics
///
/// - **Cache-friendly**: Processes pixels in row order, good for memory locality
/// - **Efficient for thin triangles**: Only visits pixels actually covered
/// - **Sequential**: Best suited for single-threaded CPU rendering
#[derive(Debug, Default)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Sorts three vertices by Y coordinate (ascending: top to bottom in screen space).
    ///
    /// After sorting: `v0.y <= v1.y <= v2.y`
    fn sort_vertices(v0: &mut Vec2, v1: &mut Vec2, v2: &mut Vec2) {
        // Three comparisons suffice for 3 elements (bubble sort)
        if v1.y < v0.y {
            std::mem::swap(v0, v1);
        }
        if v2.y < v1.y {
            std::mem::swap(v1, v2);
        }
        if v1.y < v0.y {
            std::mem::swap(v0, v1);
        }
    }

    /// Visible row range for a span of screen y, clamped to the buffer.
    fn row_range(y_top: f32, y_bottom: f32, buffer: &FrameBuffer) -> (i32, i32) {
        let y_start = (y_top.ceil() as i32).max(0);
        let y_end = (y_bottom.floor() as i32).min(buffer.height() as i32 - 1);
        (y_start, y_end)
    }

    /// Fills a flat-bottom triangle: `v0` on top, `v1` and `v2` share a Y.
    ///
    /// ```text
    ///        v0 (top)
    ///        /\
    ///       /  \
    ///      /____\
    ///   v1        v2  (same Y)
    /// ```
    fn fill_flat_bottom(v0: Vec2, v1: Vec2, v2: Vec2, buffer: &mut FrameBuffer, color: u32) {
        let height = v1.y - v0.y;
        if height.abs() < f32::EPSILON {
            return; // Degenerate triangle (zero height)
        }

        // Change in X per unit Y along each edge leaving v0
        let inv_slope_1 = (v1.x - v0.x) / height;
        let inv_slope_2 = (v2.x - v0.x) / height;

        let (y_start, y_end) = Self::row_range(v0.y, v1.y, buffer);
        for y in y_start..=y_end {
            let dy = y as f32 - v0.y;
            let x1 = v0.x + inv_slope_1 * dy;
            let x2 = v0.x + inv_slope_2 * dy;

            let x_left = x1.min(x2).ceil() as i32;
            let x_right = x1.max(x2).floor() as i32;

            buffer.fill_scanline(y, x_left, x_right, color);
        }
    }

    /// Fills a flat-top triangle: `v0` and `v1` share a Y, `v2` at the bottom.
    ///
    /// ```text
    ///   v0 ______ v1  (same Y)
    ///      \    /
    ///       \  /
    ///        \/
    ///        v2 (bottom)
    /// ```
    fn fill_flat_top(v0: Vec2, v1: Vec2, v2: Vec2, buffer: &mut FrameBuffer, color: u32) {
        let height = v2.y - v0.y;
        if height.abs() < f32::EPSILON {
            return;
        }

        let inv_slope_1 = (v2.x - v0.x) / height; // Edge v0 -> v2
        let inv_slope_2 = (v2.x - v1.x) / height; // Edge v1 -> v2

        let (y_start, y_end) = Self::row_range(v0.y, v2.y, buffer);
        for y in y_start..=y_end {
            let dy = y as f32 - v0.y;
            let x1 = v0.x + inv_slope_1 * dy;
            let x2 = v1.x + inv_slope_2 * dy;

            let x_left = x1.min(x2).ceil() as i32;
            let x_right = x1.max(x2).floor() as i32;

            buffer.fill_scanline(y, x_left, x_right, color);
        }
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, color: u32) {
        let [mut v0, mut v1, mut v2] = triangle.points;

        Self::sort_vertices(&mut v0, &mut v1, &mut v2);

        if (v1.y - v2.y).abs() < f32::EPSILON {
            Self::fill_flat_bottom(v0, v1, v2, buffer, color);
            return;
        }

        if (v0.y - v1.y).abs() < f32::EPSILON {
            Self::fill_flat_top(v0, v1, v2, buffer, color);
            return;
        }

        // Split along the long edge v0 -> v2 at the height of v1
        let t = (v1.y - v0.y) / (v2.y - v0.y);
        let split_point = Vec2::new(v0.x + (v2.x - v0.x) * t, v1.y);

        Self::fill_flat_bottom(v0, v1, split_point, buffer, color);
        Self::fill_flat_top(v1, split_point, v2, buffer, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_general_triangle_rows() {
        let mut pixels = vec![0u32; 20 * 20];
        let mut fb = FrameBuffer::new(&mut pixels, 20, 20);
        let triangle = Triangle::new([
            Vec2::new(10.0, 2.0),
            Vec2::new(2.0, 10.0),
            Vec2::new(16.0, 18.0),
        ]);
        ScanlineRasterizer::new().fill_triangle(&triangle, &mut fb, 3);
        assert_eq!(fb.get_pixel(10, 10), Some(3));
        assert_eq!(fb.get_pixel(1, 1), Some(0));
        assert_eq!(fb.get_pixel(18, 4), Some(0));
    }

    #[test]
    fn zero_height_triangle_draws_nothing() {
        let mut pixels = vec![0u32; 10 * 10];
        let mut fb = FrameBuffer::new(&mut pixels, 10, 10);
        let triangle = Triangle::new([
            Vec2::new(1.0, 5.0),
            Vec2::new(4.0, 5.0),
            Vec2::new(8.0, 5.0),
        ]);
        ScanlineRasterizer::new().fill_triangle(&triangle, &mut fb, 3);
        assert!(pixels.iter().all(|&c| c == 0));
    }
}
