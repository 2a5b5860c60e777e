//! Owned pixel buffer.
//!
//! [`PixelBuffer`] is a single contiguous `Vec<Rgba8>` addressed by
//! `(x, y)`, with stride-based row accessors.
//!
//! # Memory Layout
//!
//! Row-major, **bottom-scanline-first**:
//!
//! ```text
//! data[0 .. w]        <- row 0 (bottom of the picture)
//! data[w .. 2w]       <- row 1
//! ...
//! data[(h-1)w .. hw]  <- row h-1 (top of the picture)
//! ```
//!
//! # Usage
//!
//! ```rust
//! use recolor_core::{PixelBuffer, Rgba8};
//!
//! let gray = [128u8; 2 * 2];
//! let buf = PixelBuffer::from_interleaved(2, 2, 1, &gray).unwrap();
//! assert_eq!(buf.pixel(1, 1), Rgba8::opaque(128, 128, 128));
//! assert_eq!(buf.to_bytes().len(), 2 * 2 * 4);
//! ```
//!
//! # Used By
//!
//! - `recolor-io` - decode target, encode source
//! - `recolor-color` - transfer input/output
//! - `recolor-ops` - resampler output, session state

use crate::{Error, Result, Rgba8};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Exclusive owner of `width * height` [`Rgba8`] pixels.
///
/// A zero-sized buffer ([`PixelBuffer::empty`]) is valid and stands for
/// "nothing loaded".
///
/// # Example
///
/// ```rust
/// use recolor_core::{PixelBuffer, Rgba8};
///
/// let mut img = PixelBuffer::new(3, 2);
/// img.set_pixel(2, 1, Rgba8::opaque(1, 2, 3));
/// assert_eq!(img.row(1)[2], Rgba8::opaque(1, 2, 3));
/// assert_eq!(img.get_pixel(3, 0), None);
/// ```
#[derive(Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    data: Vec<Rgba8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Creates a 0x0 buffer.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            data: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    /// Creates a buffer filled with transparent black.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba8::default())
    }

    /// Creates a buffer filled with `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Rgba8) -> Self {
        Self {
            data: vec![pixel; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Builds a buffer from interleaved 8-bit samples.
    ///
    /// Channel layouts are normalised to RGBA:
    ///
    /// | channels | layout | result |
    /// |----------|--------|--------|
    /// | 1 | gray | `(g, g, g, 255)` |
    /// | 2 | gray, alpha | `(g, g, g, a)` |
    /// | 3 | RGB | `(r, g, b, 255)` |
    /// | 4 | RGBA | as is |
    ///
    /// Rows are taken in the order given; no flip is applied.
    ///
    /// # Errors
    ///
    /// - [`Error::ChannelCount`] for a channel count outside `1..=4`
    /// - [`Error::InvalidDimensions`] if `bytes.len()` is not
    ///   `width * height * channels`
    pub fn from_interleaved(width: u32, height: u32, channels: u8, bytes: &[u8]) -> Result<Self> {
        if !(1..=4).contains(&channels) {
            return Err(Error::ChannelCount { channels });
        }
        let count = pixel_count(width, height)?;
        let expected = count
            .checked_mul(channels as usize)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "byte size overflows"))?;
        if bytes.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!(
                    "expected {} bytes for {} channel(s), got {}",
                    expected,
                    channels,
                    bytes.len()
                ),
            ));
        }

        let data = match channels {
            1 => bytes.iter().map(|&g| Rgba8::gray(g)).collect(),
            2 => bytes
                .chunks_exact(2)
                .map(|s| Rgba8::new(s[0], s[0], s[0], s[1]))
                .collect(),
            3 => bytes
                .chunks_exact(3)
                .map(|s| Rgba8::opaque(s[0], s[1], s[2]))
                .collect(),
            _ => bytes
                .chunks_exact(4)
                .map(|s| Rgba8::new(s[0], s[1], s[2], s[3]))
                .collect(),
        };

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `Ok(())` if `other` has the same dimensions.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] otherwise.
    pub fn ensure_same_size(&self, other: &Self) -> Result<()> {
        if self.dimensions() == other.dimensions() {
            Ok(())
        } else {
            Err(Error::dimension_mismatch(self.dimensions(), other.dimensions()))
        }
    }

    /// All pixels, row 0 first.
    #[inline]
    pub fn data(&self) -> &[Rgba8] {
        &self.data
    }

    /// All pixels, mutable.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Rgba8] {
        &mut self.data
    }

    #[inline]
    fn stride(&self) -> usize {
        // chunks() rejects 0; a 0-wide buffer has no data anyway
        (self.width as usize).max(1)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[self.offset(x, y)]
    }

    /// Returns the pixel at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        (x < self.width && y < self.height).then(|| self.pixel(x, y))
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `(x, y)` lies outside the buffer.
    pub fn try_pixel(&self, x: u32, y: u32) -> Result<Rgba8> {
        self.get_pixel(x, y)
            .ok_or_else(|| Error::out_of_bounds(x, y, self.width, self.height))
    }

    /// Sets the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.offset(x, y);
        self.data[offset] = pixel;
    }

    /// Fills the whole buffer with `pixel`.
    pub fn fill(&mut self, pixel: Rgba8) {
        self.data.fill(pixel);
    }

    /// Returns row `y` as a slice of `width` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[Rgba8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Returns row `y` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [Rgba8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize;
        let end = start + self.width as usize;
        &mut self.data[start..end]
    }

    /// Iterates rows, row 0 first.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Rgba8]> + ExactSizeIterator + '_ {
        self.data.chunks(self.stride())
    }

    /// Iterates rows mutably, row 0 first.
    pub fn rows_mut(&mut self) -> impl ExactSizeIterator<Item = &mut [Rgba8]> + '_ {
        let stride = self.stride();
        self.data.chunks_mut(stride)
    }

    /// Parallel iterator over `(y, row)` pairs.
    ///
    /// Rows are disjoint, so each worker owns its slice outright.
    #[cfg(feature = "parallel")]
    pub fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = (usize, &mut [Rgba8])> + '_ {
        let stride = self.stride();
        self.data.par_chunks_mut(stride).enumerate()
    }

    /// Reverses the row order in place.
    ///
    /// Converts between the in-memory bottom-first order and the top-first
    /// order of image files.
    pub fn flip_vertical(&mut self) {
        let w = self.width as usize;
        let h = self.height as usize;
        for y in 0..h / 2 {
            let (lower, upper) = self.data.split_at_mut((h - 1 - y) * w);
            lower[y * w..(y + 1) * w].swap_with_slice(&mut upper[..w]);
        }
    }

    /// Returns a vertically flipped copy.
    pub fn flipped(&self) -> Self {
        let mut out = self.clone();
        out.flip_vertical();
        out
    }

    /// Interleaved RGBA bytes in storage order (row 0 first).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Interleaved RGB bytes in storage order, alpha dropped.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|p| p.rgb()).collect()
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows"))
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: u32, h: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                buf.set_pixel(x, y, Rgba8::opaque(x as u8, y as u8, (x + y) as u8));
            }
        }
        buf
    }

    #[test]
    fn test_buffer_new_is_zeroed() {
        let buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.dimensions(), (3, 2));
        assert_eq!(buf.pixel_count(), 6);
        assert!(buf.data().iter().all(|p| *p == Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_buffer_empty() {
        let buf = PixelBuffer::empty();
        assert!(buf.is_empty());
        assert_eq!(buf.rows().count(), 0);
        assert!(buf.to_bytes().is_empty());
    }

    #[test]
    fn test_buffer_set_get_pixel() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.set_pixel(3, 2, Rgba8::opaque(9, 8, 7));
        assert_eq!(buf.pixel(3, 2), Rgba8::opaque(9, 8, 7));
        assert_eq!(buf.get_pixel(4, 0), None);
        assert!(buf.try_pixel(0, 4).unwrap_err().is_bounds_error());
    }

    #[test]
    fn test_buffer_rows() {
        let buf = ramp(3, 4);
        assert_eq!(buf.rows().len(), 4);
        for (y, row) in buf.rows().enumerate() {
            assert_eq!(row.len(), 3);
            assert_eq!(row, buf.row(y as u32));
            assert_eq!(row[0].g, y as u8);
        }
    }

    #[test]
    fn test_buffer_row_mut() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.row_mut(1).fill(Rgba8::gray(5));
        assert_eq!(buf.pixel(0, 0), Rgba8::TRANSPARENT);
        assert_eq!(buf.pixel(1, 1), Rgba8::gray(5));
    }

    #[test]
    fn test_flip_vertical_even() {
        let mut buf = ramp(2, 4);
        let orig = buf.clone();
        buf.flip_vertical();
        for y in 0..4 {
            assert_eq!(buf.row(y), orig.row(3 - y));
        }
        buf.flip_vertical();
        assert_eq!(buf, orig);
    }

    #[test]
    fn test_flip_vertical_odd_keeps_middle() {
        let buf = ramp(3, 3);
        let flipped = buf.flipped();
        assert_eq!(flipped.row(1), buf.row(1));
        assert_eq!(flipped.row(0), buf.row(2));
    }

    #[test]
    fn test_from_interleaved_gray() {
        let buf = PixelBuffer::from_interleaved(2, 1, 1, &[10, 20]).unwrap();
        assert_eq!(buf.pixel(0, 0), Rgba8::opaque(10, 10, 10));
        assert_eq!(buf.pixel(1, 0), Rgba8::opaque(20, 20, 20));
    }

    #[test]
    fn test_from_interleaved_gray_alpha() {
        let buf = PixelBuffer::from_interleaved(1, 1, 2, &[10, 99]).unwrap();
        assert_eq!(buf.pixel(0, 0), Rgba8::new(10, 10, 10, 99));
    }

    #[test]
    fn test_from_interleaved_rgb_and_rgba() {
        let rgb = PixelBuffer::from_interleaved(1, 1, 3, &[1, 2, 3]).unwrap();
        assert_eq!(rgb.pixel(0, 0), Rgba8::new(1, 2, 3, 255));
        let rgba = PixelBuffer::from_interleaved(1, 1, 4, &[1, 2, 3, 4]).unwrap();
        assert_eq!(rgba.pixel(0, 0), Rgba8::new(1, 2, 3, 4));
        assert_eq!(rgba.to_bytes(), vec![1, 2, 3, 4]);
        assert_eq!(rgba.to_rgb_bytes(), vec![1, 2, 3]);
    }

    #[test]
    fn test_from_interleaved_errors() {
        assert_eq!(
            PixelBuffer::from_interleaved(1, 1, 5, &[0; 5]),
            Err(Error::ChannelCount { channels: 5 })
        );
        assert!(matches!(
            PixelBuffer::from_interleaved(2, 2, 3, &[0; 11]),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_ensure_same_size() {
        let a = PixelBuffer::new(2, 3);
        assert!(a.ensure_same_size(&PixelBuffer::new(2, 3)).is_ok());
        assert!(matches!(
            a.ensure_same_size(&PixelBuffer::new(3, 2)),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_par_rows_mut_matches_sequential() {
        let mut par = PixelBuffer::new(5, 7);
        par.par_rows_mut().for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate() {
                *px = Rgba8::opaque(x as u8, y as u8, 0);
            }
        });

        let mut seq = PixelBuffer::new(5, 7);
        for (y, row) in seq.rows_mut().enumerate() {
            for (x, px) in row.iter_mut().enumerate() {
                *px = Rgba8::opaque(x as u8, y as u8, 0);
            }
        }
        assert_eq!(par, seq);
    }
}
