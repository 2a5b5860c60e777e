//! # recolor-core
//!
//! Core pixel types for the recolor pipeline.
//!
//! - [`Rgba8`] - 4-channel 8-bit pixel
//! - [`PixelBuffer`] - owned, contiguous 2D array of [`Rgba8`]
//! - [`Error`], [`Result`] - buffer construction and access errors
//!
//! ## Scanline Order
//!
//! Buffers are stored **bottom-scanline-first**: row 0 is the bottom row of
//! the picture. File formats store the top row first, so codecs call
//! [`PixelBuffer::flip_vertical`] at the boundary in both directions.
//!
//! ```rust
//! use recolor_core::{PixelBuffer, Rgba8};
//!
//! let mut buf = PixelBuffer::new(4, 2);
//! buf.set_pixel(0, 0, Rgba8::opaque(255, 0, 0));
//! buf.flip_vertical();
//! assert_eq!(buf.pixel(0, 1), Rgba8::opaque(255, 0, 0));
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! recolor-core (this crate)
//!    ^
//!    +-- recolor-color (lαβ transfer)
//!    +-- recolor-io (PNG/JPEG codecs)
//!    +-- recolor-ops (resampling, session)
//!    +-- recolor-view (viewer)
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - row-parallel iteration with rayon (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod pixel;

pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use pixel::Rgba8;

/// Prelude module for convenient imports.
///
/// ```
/// use recolor_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::pixel::Rgba8;
}
