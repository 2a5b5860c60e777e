//! Benchmarks for the recolor crates.
//!
//! Run with: `cargo bench -p recolor-bench`. This library only holds the
//! shared test-image generator.

use recolor_core::{PixelBuffer, Rgba8};

/// Deterministic test image with smooth gradients and some texture.
pub fn test_image(width: u32, height: u32) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height);
    for (y, row) in buf.rows_mut().enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            let r = (x * 255 / width.max(1) as usize) as u8;
            let g = (y * 255 / height.max(1) as usize) as u8;
            let b = ((x ^ y) & 0xff) as u8;
            *px = Rgba8::opaque(r, g, b);
        }
    }
    buf
}
