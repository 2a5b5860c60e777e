//! # recolor-math
//!
//! Small fixed-size linear algebra for the recolor pipeline.
//!
//! - [`Mat3`] - 3x3 matrices used both as color transforms and as 2D
//!   projective transforms
//! - [`Vec3`] - 3-component vectors for color triples (RGB, LMS, lαβ)
//! - [`HPoint`] - homogeneous 2D points `(x, y, w)` for image geometry
//!
//! The two vector types share the same matrix but are kept apart so that a
//! pixel coordinate cannot be fed into a color matrix by accident.
//!
//! # Convention
//!
//! All matrices use **row-major** storage and **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Composition applies right to left: `(A * B) * v == A * (B * v)`.
//!
//! # Usage
//!
//! ```rust
//! use recolor_math::{HPoint, Mat3, Vec3};
//!
//! // Color transform
//! let m = Mat3::diagonal(2.0, 2.0, 2.0);
//! assert_eq!(m * Vec3::splat(0.5), Vec3::ONE);
//!
//! // Geometry: scale x by 3, y by 2
//! let s = Mat3::IDENTITY.scaled(3.0, 2.0);
//! let p = (s * HPoint::new(1.0, 1.0)).project().unwrap();
//! assert_eq!(p, (3.0, 2.0));
//! ```
//!
//! # Used By
//!
//! - `recolor-color` - RGB/LMS/lαβ matrices
//! - `recolor-ops` - projective resampling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod mat3;
mod point;
mod vec3;

pub use error::{MathError, MathResult};
pub use mat3::*;
pub use point::*;
pub use vec3::*;
