//! Error types for I/O operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported color type or bit depth.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Decoded bytes don't form a valid pixel buffer.
    #[error("invalid image data: {0}")]
    InvalidData(#[from] recolor_core::Error),
}

impl IoError {
    /// Returns `true` for errors raised while reading.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::DecodeError(_) | Self::UnsupportedBitDepth(_) | Self::InvalidData(_)
        )
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
