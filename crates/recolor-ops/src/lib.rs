//! # recolor-ops
//!
//! Geometric alignment and the end-to-end recolor pipeline.
//!
//! - [`resample`] - projective inverse-mapping warp with nearest-neighbor
//!   sampling and automatic output bounds
//! - [`session`] - load, align, transfer and export as one object
//!
//! # Architecture
//!
//! ```text
//!               recolor-ops
//!                    |
//!     +----------+---+-------+----------+
//!     |          |           |          |
//! recolor-io recolor-color recolor-math recolor-core
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use recolor_color::TransferOptions;
//! use recolor_ops::Session;
//!
//! let mut session = Session::load("palette.jpg", "photo.png", TransferOptions::default());
//! session.recolor()?;
//! session.export_image("photo_recolored.png")?;
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - output rows are filled on the rayon pool (enabled by
//!   default). Output is identical with the feature off.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod resample;
pub mod session;

pub use error::{OpsError, OpsResult};
pub use resample::{BoundingBox, Warp, resample_to, warp_projective};
pub use session::Session;
