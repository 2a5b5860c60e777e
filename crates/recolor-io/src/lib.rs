//! # recolor-io
//!
//! Image file I/O for the recolor pipeline.
//!
//! - **PNG** - lossless, gray/RGB with optional alpha
//! - **JPEG** - lossy, quality setting
//!
//! # Architecture
//!
//! - [`ImageReader`] / [`ImageWriter`] - per-format traits, implemented by
//!   [`PngCodec`] and [`JpegCodec`]
//! - [`decode`] / [`encode`] - file-level functions with format detection,
//!   exchanging [`DecodedImage`] in file (top-first) row order
//! - [`load`] / [`save`] - the same, but exchanging a
//!   [`PixelBuffer`](recolor_core::PixelBuffer) in memory (bottom-first)
//!   order with channels normalised to RGBA
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use recolor_io::{load, save};
//!
//! let image = load("input.jpg")?;
//! save("output.png", &image)?;
//! ```
//!
//! # Format Detection
//!
//! Reading checks magic bytes first and falls back to the extension.
//! Writing goes by extension only.
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod detect;
pub mod error;
pub mod image;
pub mod traits;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use image::DecodedImage;
pub use traits::{ImageReader, ImageWriter};

#[cfg(feature = "jpeg")]
pub use crate::jpeg::JpegCodec;
#[cfg(feature = "png")]
pub use crate::png::PngCodec;

use recolor_core::PixelBuffer;
use std::path::Path;
use tracing::debug;

/// Decodes a file into interleaved bytes, top row first.
///
/// # Errors
///
/// - [`IoError::Io`] if the file can't be read
/// - [`IoError::UnsupportedFormat`] if the format isn't PNG or JPEG
/// - [`IoError::DecodeError`] / [`IoError::UnsupportedBitDepth`] for
///   malformed or exotic files
pub fn decode<P: AsRef<Path>>(path: P) -> IoResult<DecodedImage> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    let data = std::fs::read(path)?;
    let image = decode_as(format, &data)?;
    debug!(
        path = %path.display(),
        %format,
        width = image.width,
        height = image.height,
        channels = image.channels,
        "decoded"
    );
    Ok(image)
}

/// Decodes an in-memory file, detecting the format from its magic bytes.
pub fn decode_from_memory(data: &[u8]) -> IoResult<DecodedImage> {
    decode_as(Format::from_bytes(data), data)
}

fn decode_as(format: Format, data: &[u8]) -> IoResult<DecodedImage> {
    match format {
        #[cfg(feature = "png")]
        Format::Png => PngCodec::new().read_from_memory(data),
        #[cfg(feature = "jpeg")]
        Format::Jpeg => JpegCodec::new().read_from_memory(data),
        other => Err(IoError::UnsupportedFormat(format!("cannot read {}", other))),
    }
}

/// Encodes interleaved bytes (top row first) to a file.
///
/// The format is chosen by the file extension.
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] for an unknown extension
/// - [`IoError::EncodeError`] if the codec rejects the image
/// - [`IoError::Io`] if the file can't be written
pub fn encode<P: AsRef<Path>>(path: P, image: &DecodedImage) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    match format {
        #[cfg(feature = "png")]
        Format::Png => PngCodec::new().write(path, image)?,
        #[cfg(feature = "jpeg")]
        Format::Jpeg => JpegCodec::new().write(path, image)?,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "no writer for {}",
                path.display()
            )));
        }
    }
    debug!(path = %path.display(), %format, width = image.width, height = image.height, "encoded");
    Ok(())
}

/// Loads a file as an RGBA [`PixelBuffer`] in bottom-first row order.
///
/// Gray input is replicated to RGB; missing alpha becomes 255.
pub fn load<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    decode(path)?.to_pixel_buffer()
}

/// Saves a bottom-first [`PixelBuffer`], flipping to file row order.
///
/// # Errors
///
/// [`IoError::EncodeError`] for an empty buffer, plus everything
/// [`encode`] returns.
pub fn save<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> IoResult<()> {
    if buffer.is_empty() {
        return Err(IoError::EncodeError("image is empty".into()));
    }
    encode(path, &DecodedImage::from_pixel_buffer(buffer))
}

#[cfg(all(test, feature = "png", feature = "jpeg"))]
mod tests {
    use super::*;
    use recolor_core::Rgba8;

    fn sample() -> PixelBuffer {
        let mut buf = PixelBuffer::new(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                buf.set_pixel(x, y, Rgba8::new(x as u8 * 60, y as u8 * 100, 7, 200 + y as u8));
            }
        }
        buf
    }

    #[test]
    fn test_png_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let buf = sample();

        save(&path, &buf).unwrap();
        assert_eq!(load(&path).unwrap(), buf);
    }

    #[test]
    fn test_save_flips_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flip.png");
        let buf = sample();
        save(&path, &buf).unwrap();

        let file = decode(&path).unwrap();
        // first row in the file is the top row, i.e. the last in memory
        assert_eq!(&file.data[..4], &buf.pixel(0, 2).to_array());
    }

    #[test]
    fn test_jpeg_save_load_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        save(&path, &PixelBuffer::filled(20, 10, Rgba8::gray(90))).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.dimensions(), (20, 10));
        assert!(loaded.data().iter().all(|p| p.a == 255));
    }

    #[test]
    fn test_gray_png_loads_opaque() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        encode(&path, &DecodedImage::new(2, 1, 1, vec![10, 250])).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.pixel(0, 0), Rgba8::opaque(10, 10, 10));
        assert_eq!(loaded.pixel(1, 0), Rgba8::opaque(250, 250, 250));
    }

    #[test]
    fn test_detects_content_not_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png_path = dir.path().join("real.png");
        save(&png_path, &sample()).unwrap();
        let renamed = dir.path().join("actually_png.jpg");
        std::fs::rename(&png_path, &renamed).unwrap();

        assert_eq!(load(&renamed).unwrap(), sample());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }

    #[test]
    fn test_unknown_output_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = save(dir.path().join("out.bmp"), &sample()).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_unreadable_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("text.txt");
        std::fs::write(&path, "not an image").unwrap();
        assert!(matches!(load(&path), Err(IoError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_save_empty() {
        let dir = tempfile::tempdir().unwrap();
        let err = save(dir.path().join("e.png"), &PixelBuffer::empty()).unwrap_err();
        assert!(matches!(err, IoError::EncodeError(_)));
    }

    #[test]
    fn test_decode_from_memory() {
        let bytes = PngCodec::new()
            .write_to_memory(&DecodedImage::new(1, 1, 3, vec![1, 2, 3]))
            .unwrap();
        assert_eq!(decode_from_memory(&bytes).unwrap().data, vec![1, 2, 3]);
    }
}
