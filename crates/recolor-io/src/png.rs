//! PNG format support.
//!
//! Reads 1-16 bit gray, gray+alpha, RGB, RGBA and palette images into 8-bit
//! interleaved data (palettes and low bit depths are expanded, 16-bit
//! samples keep their high byte). Writes 8-bit data with 1-4 channels.
//!
//! # Example
//!
//! ```rust,ignore
//! use recolor_io::{ImageReader, ImageWriter, PngCodec};
//!
//! let image = PngCodec::new().read("input.png")?;
//! PngCodec::new().write("output.png", &image)?;
//! ```

use crate::{DecodedImage, ImageReader, ImageWriter, IoError, IoResult};
use crate::detect::PNG_MAGIC;
use std::io::{BufRead, Cursor, Seek};

/// PNG reader and writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl PngCodec {
    /// Creates a codec.
    pub fn new() -> Self {
        Self
    }

    fn decode<R: BufRead + Seek>(&self, input: R) -> IoResult<DecodedImage> {
        let mut decoder = png::Decoder::new(input);
        decoder.set_transformations(png::Transformations::EXPAND);
        let mut reader = decoder
            .read_info()
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
        let raw = &buf[..info.buffer_size()];

        let channels = match info.color_type {
            png::ColorType::Grayscale => 1,
            png::ColorType::GrayscaleAlpha => 2,
            png::ColorType::Rgb => 3,
            png::ColorType::Rgba => 4,
            other => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "{:?} {:?}",
                    other, info.bit_depth
                )));
            }
        };

        let data = match info.bit_depth {
            png::BitDepth::Eight => raw.to_vec(),
            // big-endian samples: keep the high byte
            png::BitDepth::Sixteen => raw.chunks_exact(2).map(|s| s[0]).collect(),
            depth => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "{:?} {:?}",
                    info.color_type, depth
                )));
            }
        };

        Ok(DecodedImage::new(info.width, info.height, channels, data))
    }
}

impl ImageReader for PngCodec {
    fn format_name(&self) -> &'static str {
        "PNG"
    }

    fn can_read(&self, header: &[u8]) -> bool {
        header.starts_with(&PNG_MAGIC)
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<DecodedImage> {
        self.decode(Cursor::new(data))
    }
}

impl ImageWriter for PngCodec {
    fn format_name(&self) -> &'static str {
        "PNG"
    }

    fn write_to_memory(&self, image: &DecodedImage) -> IoResult<Vec<u8>> {
        let color_type = match image.channels {
            1 => png::ColorType::Grayscale,
            2 => png::ColorType::GrayscaleAlpha,
            3 => png::ColorType::Rgb,
            4 => png::ColorType::Rgba,
            n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
        };

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, image.width, image.height);
            encoder.set_color(color_type);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(png::Compression::default());

            let mut writer = encoder
                .write_header()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            writer
                .write_image_data(&image.data)
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, channels: u8) -> DecodedImage {
        let mut data = Vec::with_capacity((width * height * channels as u32) as usize);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels as u32 {
                    data.push((x * 8 + y * 3 + c * 40) as u8);
                }
            }
        }
        DecodedImage::new(width, height, channels, data)
    }

    #[test]
    fn test_roundtrip_rgb() {
        let image = gradient(32, 16, 3);
        let bytes = PngCodec::new().write_to_memory(&image).unwrap();
        assert!(PngCodec::new().can_read(&bytes));
        let loaded = PngCodec::new().read_from_memory(&bytes).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_roundtrip_rgba_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        let image = gradient(16, 16, 4);

        PngCodec::new().write(&path, &image).unwrap();
        let loaded = PngCodec::new().read(&path).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_gray_keeps_channel_count() {
        let image = gradient(8, 8, 1);
        let bytes = PngCodec::new().write_to_memory(&image).unwrap();
        let loaded = PngCodec::new().read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.channels, 1);
        assert_eq!(loaded.data, image.data);
    }

    #[test]
    fn test_bad_channel_count() {
        let image = DecodedImage::new(1, 1, 5, vec![0; 5]);
        assert!(matches!(
            PngCodec::new().write_to_memory(&image),
            Err(IoError::EncodeError(_))
        ));
    }

    #[test]
    fn test_truncated_file() {
        let mut bytes = PngCodec::new().write_to_memory(&gradient(8, 8, 3)).unwrap();
        bytes.truncate(PNG_MAGIC.len() + 4);
        let err = PngCodec::new().read_from_memory(&bytes).unwrap_err();
        assert!(err.is_decode_error());
    }
}
