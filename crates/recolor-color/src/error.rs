//! Error types for color transfer.

use thiserror::Error;

/// Color transfer error.
///
/// Every variant aborts the transfer before an output buffer is built, so a
/// failed call never yields partially recolored pixels.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorError {
    /// A destination channel has (numerically) zero standard deviation and
    /// the policy is [`DegeneratePolicy::Reject`](crate::DegeneratePolicy::Reject).
    #[error("degenerate statistics: {channel} channel of the destination is flat (std {std_dev:e})")]
    DegenerateStatistics {
        /// lαβ channel name (`l`, `alpha` or `beta`).
        channel: &'static str,
        /// Measured standard deviation.
        std_dev: f64,
    },

    /// The transfer produced NaN or infinity.
    #[error("non-finite value in {0}")]
    NonFinite(String),

    /// Source or destination has no pixels.
    #[error("cannot compute statistics of an empty image")]
    EmptyImage,

    /// Source and destination sizes differ.
    #[error("size mismatch: source {source_size:?} vs destination {dest_size:?}")]
    SizeMismatch {
        /// Source `(width, height)`.
        source_size: (u32, u32),
        /// Destination `(width, height)`.
        dest_size: (u32, u32),
    },
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
