//! Low-level rendering primitives.
//!
//! Provides the [`Renderer`] struct which owns the color buffer and implements
//! basic drawing operations like lines and polygon outlines.

use super::framebuffer::FrameBuffer;
use crate::colors;
use crate::math::vec2::Vec2;

#[derive(Debug)]
pub struct Renderer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = (y as u32 * self.width + x as u32) as usize;
            self.color_buffer[index] = color;
        }
    }

    /// Draws the closed outline of a polygon.
    pub fn draw_polygon_outline(&mut self, points: &[Vec2], color: u32) {
        if points.len() < 2 {
            return;
        }
        for (i, &start) in points.iter().enumerate() {
            let end = points[(i + 1) % points.len()];
            self.draw_segment(start, end, color);
        }
    }

    /// Draws a line segment given in floating-point screen coordinates.
    ///
    /// The segment is clipped to the buffer first, so endpoints far outside
    /// the viewport neither overflow the integer stepping nor cost a step per
    /// off-screen pixel.
    pub fn draw_segment(&mut self, start: Vec2, end: Vec2, color: u32) {
        let max = Vec2::new(self.width as f32 - 1.0, self.height as f32 - 1.0);
        if let Some((a, b)) = clip_segment(start, end, max) {
            self.draw_line(
                a.x.round() as i32,
                a.y.round() as i32,
                b.x.round() as i32,
                b.y.round() as i32,
                color,
            );
        }
    }

    /// Draws a line between two points using Bresenham's line algorithm.
    ///
    /// Bresenham's algorithm efficiently determines which pixels to illuminate
    /// by using only integer arithmetic. It works by tracking an "error" term
    /// that represents the distance between the ideal line and the current pixel.
    ///
    /// For each step along the major axis (the axis with greater distance), we
    /// decide whether to also step along the minor axis based on accumulated
    /// error. When the error exceeds a threshold, we step diagonally instead of
    /// straight.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        // Calculate the absolute distances in each axis.
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        // +1 if we're moving in the positive direction, -1 if negative.
        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        // A positive error favors x movement, negative favors y.
        let mut err = dx - dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            // Double the error for comparison (avoids floating point).
            let e2 = 2 * err;

            // The error has accumulated enough that we should step in x.
            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }

            // Stepping in y reduces our deviation from the ideal line.
            // Both conditions can be true, resulting in a diagonal step.
            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }
    }

    /// Read-only access to the packed ARGB8888 pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8, and the
        // byte slice covers exactly the memory of the borrowed u32 slice.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Get a mutable FrameBuffer view into the color buffer.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.color_buffer, self.width, self.height)
    }
}

/// Liang-Barsky clip of the segment `a -> b` against `[0, max.x] x [0, max.y]`.
fn clip_segment(a: Vec2, b: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    if max.x < 0.0 || max.y < 0.0 {
        return None;
    }
    let d = b - a;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;

    // Each pair is (p, q) for one boundary: inside iff p * t <= q.
    let boundaries = [
        (-d.x, a.x),
        (d.x, max.x - a.x),
        (-d.y, a.y),
        (d.y, max.y - a.y),
    ];
    for (p, q) in boundaries {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((a + d * t0, a + d * t1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(renderer: &Renderer, color: u32) -> usize {
        renderer.pixels().iter().filter(|&&c| c == color).count()
    }

    #[test]
    fn horizontal_line_covers_every_pixel() {
        let mut renderer = Renderer::new(10, 5);
        renderer.clear(0);
        renderer.draw_line(1, 2, 8, 2, 7);
        assert_eq!(count(&renderer, 7), 8);
    }

    #[test]
    fn outline_closes_polygon() {
        let mut renderer = Renderer::new(10, 10);
        renderer.clear(0);
        let square = [
            Vec2::new(1.0, 1.0),
            Vec2::new(8.0, 1.0),
            Vec2::new(8.0, 8.0),
            Vec2::new(1.0, 8.0),
        ];
        renderer.draw_polygon_outline(&square, 7);
        // Perimeter of a 8x8 pixel square.
        assert_eq!(count(&renderer, 7), 28);
        assert_eq!(renderer.pixels()[(4 * 10 + 1) as usize], 7);
        assert_eq!(renderer.pixels()[(4 * 10 + 4) as usize], 0);
    }

    #[test]
    fn far_offscreen_segment_is_clipped() {
        let mut renderer = Renderer::new(10, 10);
        renderer.clear(0);
        renderer.draw_segment(Vec2::new(-1.0e5, 5.0), Vec2::new(1.0e5, 5.0), 7);
        assert_eq!(count(&renderer, 7), 10);
        renderer.draw_segment(Vec2::new(-50.0, -50.0), Vec2::new(-10.0, 100.0), 9);
        assert_eq!(count(&renderer, 9), 0);
    }

    #[test]
    fn bytes_view_matches_pixel_count() {
        let renderer = Renderer::new(4, 3);
        assert_eq!(renderer.as_bytes().len(), 4 * 3 * 4);
    }
}
