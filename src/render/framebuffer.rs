//! Color and depth buffers.
//!
//! Both buffers are `width * height`, row-major, origin top-left. Every write
//! is bounds-checked; coordinates outside the buffer are silently dropped.
//!
//! # Depth Buffer
//!
//! Depth is stored as `1 - 1/w`, where `w` is the view-space distance kept
//! through projection. Smaller values are nearer the camera, and the buffer
//! is reset to `1.0` (infinitely far) every frame.

use crate::colors;

pub const FAR_DEPTH: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![FAR_DEPTH; size],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(FAR_DEPTH);
    }

    /// Set a pixel without depth testing (for overlays, grid, wireframe).
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is only written if `depth` is strictly nearer (smaller) than
    /// the stored value, so stored depths never increase within a frame.
    /// Returns whether the pixel was written.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: u32) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.depth_buffer[idx] => {
                self.depth_buffer[idx] = depth;
                self.color_buffer[idx] = color;
                true
            }
            _ => false,
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the depth at (x, y), or None if out of bounds.
    pub fn depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// The color buffer as raw bytes, for uploading to an ARGB8888 texture.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and any byte pattern is a valid u8; the
        // slice covers exactly the buffer's allocation and borrows `self`.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Dots every `spacing`-th pixel on both axes.
    pub fn draw_grid(&mut self, spacing: u32, color: u32) {
        if spacing == 0 {
            return;
        }
        for y in (0..self.height).step_by(spacing as usize) {
            for x in (0..self.width).step_by(spacing as usize) {
                self.set_pixel(x as i32, y as i32, color);
            }
        }
    }

    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        for dy in 0..height {
            for dx in 0..width {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Draws a line between two points using Bresenham's line algorithm.
    ///
    /// The error term tracks the distance between the ideal line and the
    /// current pixel; once it crosses the threshold the walk steps along the
    /// minor axis as well as the major one.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        let x_step = if x0 < x1 { 1 } else { -1 };
        let y_step = if y0 < y1 { 1 } else { -1 };

        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_background_and_far() {
        let fb = FrameBuffer::new(4, 3);
        assert_eq!(fb.color_buffer().len(), 12);
        assert!(fb.color_buffer().iter().all(|&c| c == colors::BACKGROUND));
        assert!(fb.depth_buffer().iter().all(|&d| d == FAR_DEPTH));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.set_pixel(-1, 0, colors::RED);
        fb.set_pixel(4, 0, colors::RED);
        fb.set_pixel(0, 4, colors::RED);
        assert!(!fb.set_pixel_with_depth(0, -1, 0.0, colors::RED));
        assert!(fb.color_buffer().iter().all(|&c| c == colors::BACKGROUND));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn depth_test_only_accepts_nearer_values() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(fb.set_pixel_with_depth(1, 1, 0.5, colors::RED));
        assert!(!fb.set_pixel_with_depth(1, 1, 0.7, colors::GREEN));
        assert!(!fb.set_pixel_with_depth(1, 1, 0.5, colors::GREEN));
        assert_eq!(fb.pixel(1, 1), Some(colors::RED));
        assert!(fb.set_pixel_with_depth(1, 1, 0.2, colors::BLUE));
        assert_eq!(fb.pixel(1, 1), Some(colors::BLUE));
        assert_eq!(fb.depth(1, 1), Some(0.2));
    }

    #[test]
    fn clear_depth_resets_to_far() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_pixel_with_depth(0, 0, 0.1, colors::RED);
        fb.clear_depth();
        assert_eq!(fb.depth(0, 0), Some(FAR_DEPTH));
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.draw_line(1, 8, 7, 2, colors::WHITE);
        assert_eq!(fb.pixel(1, 8), Some(colors::WHITE));
        assert_eq!(fb.pixel(7, 2), Some(colors::WHITE));
        assert_eq!(fb.pixel(4, 5), Some(colors::WHITE));
    }

    #[test]
    fn as_bytes_has_four_bytes_per_pixel() {
        let fb = FrameBuffer::new(3, 2);
        assert_eq!(fb.as_bytes().len(), 24);
    }

    #[test]
    fn grid_marks_multiples_of_spacing() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.draw_grid(5, colors::GRID);
        assert_eq!(fb.pixel(0, 0), Some(colors::GRID));
        assert_eq!(fb.pixel(5, 5), Some(colors::GRID));
        assert_eq!(fb.pixel(1, 0), Some(colors::BACKGROUND));
    }
}
