//! Interleaved 8-bit image as exchanged with codecs.

use crate::IoResult;
use recolor_core::PixelBuffer;

/// Decoded image data in file order.
///
/// Rows are **top-scanline-first**, as stored in PNG and JPEG files. Use
/// [`DecodedImage::to_pixel_buffer`] and [`DecodedImage::from_pixel_buffer`]
/// to cross into the bottom-first in-memory order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Interleaved channels per pixel (1-4).
    pub channels: u8,
    /// `width * height * channels` bytes.
    pub data: Vec<u8>,
}

impl DecodedImage {
    /// Creates an image from interleaved bytes.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// RGBA image from a pixel buffer, flipped to top-first order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recolor_core::{PixelBuffer, Rgba8};
    /// use recolor_io::DecodedImage;
    ///
    /// let mut buf = PixelBuffer::new(1, 2);
    /// buf.set_pixel(0, 0, Rgba8::opaque(1, 2, 3)); // bottom row
    /// let img = DecodedImage::from_pixel_buffer(&buf);
    /// assert_eq!(img.channels, 4);
    /// assert_eq!(&img.data[4..], &[1, 2, 3, 255]); // now last
    /// ```
    pub fn from_pixel_buffer(buf: &PixelBuffer) -> Self {
        Self::new(buf.width(), buf.height(), 4, buf.flipped().to_bytes())
    }

    /// Normalises to RGBA and flips into bottom-first order.
    ///
    /// # Errors
    ///
    /// [`IoError::InvalidData`](crate::IoError::InvalidData) if the channel
    /// count or data length is inconsistent.
    pub fn to_pixel_buffer(&self) -> IoResult<PixelBuffer> {
        let mut buf = PixelBuffer::from_interleaved(self.width, self.height, self.channels, &self.data)?;
        buf.flip_vertical();
        Ok(buf)
    }

    /// Interleaved RGB bytes, expanding gray and dropping alpha.
    pub fn to_rgb(&self) -> Vec<u8> {
        match self.channels {
            1 => self.data.iter().flat_map(|&g| [g, g, g]).collect(),
            2 => self.data.chunks_exact(2).flat_map(|ga| [ga[0], ga[0], ga[0]]).collect(),
            3 => self.data.clone(),
            n => self
                .data
                .chunks_exact(n as usize)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recolor_core::Rgba8;

    #[test]
    fn test_to_pixel_buffer_flips() {
        // top row red, bottom row blue
        let img = DecodedImage::new(1, 2, 3, vec![255, 0, 0, 0, 0, 255]);
        let buf = img.to_pixel_buffer().unwrap();
        assert_eq!(buf.pixel(0, 0), Rgba8::opaque(0, 0, 255));
        assert_eq!(buf.pixel(0, 1), Rgba8::opaque(255, 0, 0));
    }

    #[test]
    fn test_buffer_round_trip() {
        let img = DecodedImage::new(2, 3, 4, (0..24).collect());
        let back = DecodedImage::from_pixel_buffer(&img.to_pixel_buffer().unwrap());
        assert_eq!(back, img);
    }

    #[test]
    fn test_gray_normalises_to_opaque_rgba() {
        let img = DecodedImage::new(2, 1, 1, vec![7, 9]);
        let buf = img.to_pixel_buffer().unwrap();
        assert_eq!(buf.pixel(1, 0), Rgba8::opaque(9, 9, 9));
    }

    #[test]
    fn test_bad_length() {
        let img = DecodedImage::new(2, 2, 3, vec![0; 5]);
        assert!(img.to_pixel_buffer().unwrap_err().is_decode_error());
    }

    #[test]
    fn test_to_rgb() {
        assert_eq!(DecodedImage::new(1, 1, 1, vec![5]).to_rgb(), vec![5, 5, 5]);
        assert_eq!(DecodedImage::new(1, 1, 2, vec![5, 0]).to_rgb(), vec![5, 5, 5]);
        assert_eq!(DecodedImage::new(1, 1, 4, vec![1, 2, 3, 4]).to_rgb(), vec![1, 2, 3]);
    }
}
