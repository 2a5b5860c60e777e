//! # recolor-color
//!
//! Statistical color transfer in a decorrelated lαβ space.
//!
//! - [`lab`] - RGB/LMS/lαβ matrices and conversions
//! - [`stats`] - per-channel mean and standard deviation
//! - [`transfer`](mod@transfer) - the global mean/std match
//!
//! # Architecture
//!
//! ```text
//!        recolor-color
//!              |
//!     +--------+--------+
//!     |                 |
//! recolor-math    recolor-core
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use recolor_color::transfer;
//! use recolor_core::{PixelBuffer, Rgba8};
//!
//! let mut source = PixelBuffer::new(2, 1);
//! source.set_pixel(0, 0, Rgba8::opaque(200, 40, 40));
//! source.set_pixel(1, 0, Rgba8::opaque(240, 80, 60));
//!
//! let mut dest = PixelBuffer::new(2, 1);
//! dest.set_pixel(0, 0, Rgba8::opaque(20, 40, 200));
//! dest.set_pixel(1, 0, Rgba8::opaque(60, 80, 240));
//!
//! let out = transfer(&source, &dest)?;
//! assert!(out.pixel(0, 0).r > out.pixel(0, 0).b);
//! # Ok::<(), recolor_color::ColorError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - pointwise passes run on the rayon pool (enabled by
//!   default). Statistics are always summed sequentially, so output does
//!   not depend on the feature or the thread count.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod lab;
pub mod stats;
pub mod transfer;

pub use error::{ColorError, ColorResult};
pub use lab::{Lab, LabConverter};
pub use stats::ChannelStats;
pub use transfer::{
    DegeneratePolicy, TransferOptions, TransferPlan, to_lab, transfer, transfer_with,
};
