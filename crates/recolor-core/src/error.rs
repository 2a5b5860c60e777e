//! Error types for recolor-core operations.
//!
//! # Usage
//!
//! ```rust
//! use recolor_core::{Error, PixelBuffer};
//!
//! let buf = PixelBuffer::new(2, 2);
//! assert_eq!(buf.try_pixel(3, 0), Err(Error::out_of_bounds(3, 0, 2, 2)));
//! ```
//!
//! # Used By
//!
//! - [`crate::buffer::PixelBuffer`] - construction and checked access
//! - `recolor-io` - wraps it when normalising decoded bytes

use thiserror::Error;

/// Result alias for buffer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or addressing a [`PixelBuffer`](crate::PixelBuffer).
///
/// # Categories
///
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Dimension errors**: [`InvalidDimensions`](Error::InvalidDimensions),
///   [`DimensionMismatch`](Error::DimensionMismatch)
/// - **Format errors**: [`ChannelCount`](Error::ChannelCount)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A pixel address past the buffer edge.
    #[error("pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        /// Requested column
        x: u32,
        /// Requested row (0 is the bottom row)
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Two buffers that must share a size do not.
    #[error("buffer sizes differ: {a_width}x{a_height} and {b_width}x{b_height}")]
    DimensionMismatch {
        /// First image width
        a_width: u32,
        /// First image height
        a_height: u32,
        /// Second image width
        b_width: u32,
        /// Second image height
        b_height: u32,
    },

    /// Dimensions don't agree with the supplied data, or overflow.
    #[error("cannot make a {width}x{height} buffer: {reason}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// What went wrong
        reason: String,
    },

    /// Interleaved data has a channel count other than 1, 2, 3 or 4.
    #[error("unsupported channel count {channels} (expected 1-4)")]
    ChannelCount {
        /// Offending channel count
        channels: u8,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// True for [`Error::OutOfBounds`].
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
