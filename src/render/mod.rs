//! Rendering back end: per-frame triangle list, pixel buffers and rasterizer.

pub mod framebuffer;
pub mod rasterizer;
pub mod triangle;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{draw_filled_triangle, draw_textured_triangle, ScreenVertex};
pub use triangle::{Triangle, TriangleBuffer};
