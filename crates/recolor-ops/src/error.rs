//! Error types for image operations.

use recolor_color::ColorError;
use recolor_io::IoError;
use recolor_math::MathError;
use thiserror::Error;

/// Error type for resampling and pipeline operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified, or a transform with zero-area output.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Transform sends part of the image to infinity or is not finite.
    #[error("degenerate transform: {0}")]
    DegenerateTransform(String),

    /// Matrix inversion failed.
    #[error("matrix error: {0}")]
    Math(#[from] MathError),

    /// Color transfer failed.
    #[error("color transfer error: {0}")]
    Color(#[from] ColorError),

    /// Reading or writing an image failed.
    #[error("image I/O error: {0}")]
    Io(#[from] IoError),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
