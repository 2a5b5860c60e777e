//! I/O traits for image readers and writers.
//!
//! These traits define the interface for format-specific implementations.

use crate::{DecodedImage, IoResult};
use std::path::Path;

/// Trait for image format readers.
///
/// # Example
///
/// ```rust,ignore
/// use recolor_io::{ImageReader, PngCodec};
///
/// let image = PngCodec::new().read("input.png")?;
/// println!("{}x{}", image.width, image.height);
/// ```
pub trait ImageReader {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// Returns `true` if `header` starts with this format's signature.
    fn can_read(&self, header: &[u8]) -> bool;

    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<DecodedImage> {
        let data = std::fs::read(path.as_ref())?;
        self.read_from_memory(&data)
    }

    /// Reads an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<DecodedImage>;
}

/// Trait for image format writers.
pub trait ImageWriter {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// Writes an image to a file path.
    fn write<P: AsRef<Path>>(&self, path: P, image: &DecodedImage) -> IoResult<()> {
        let data = self.write_to_memory(image)?;
        std::fs::write(path.as_ref(), data)?;
        Ok(())
    }

    /// Writes an image to memory.
    fn write_to_memory(&self, image: &DecodedImage) -> IoResult<Vec<u8>>;
}
