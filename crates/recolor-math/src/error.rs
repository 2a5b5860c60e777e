//! Error types for matrix operations.

use thiserror::Error;

/// Linear algebra error.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum MathError {
    /// Matrix cannot be inverted.
    ///
    /// Returned instead of an inverse full of NaN/Inf when the determinant
    /// is (numerically) zero, e.g. for a zero-area transform.
    #[error("singular matrix (determinant {det:e})")]
    Singular {
        /// Determinant of the rejected matrix.
        det: f64,
    },
}

/// Result type for matrix operations.
pub type MathResult<T> = Result<T, MathError>;
