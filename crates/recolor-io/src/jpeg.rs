//! JPEG format support.
//!
//! Reads baseline and progressive JPEG (RGB, grayscale, CMYK) into 8-bit
//! RGB. Writes RGB or grayscale at a configurable quality; alpha is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use recolor_io::{ImageWriter, JpegCodec};
//!
//! JpegCodec::with_quality(95).write("output.jpg", &image)?;
//! ```

use crate::{DecodedImage, ImageReader, ImageWriter, IoError, IoResult};
use crate::detect::JPEG_MAGIC;
use std::io::{BufReader, Cursor};

/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 90;

/// JPEG reader and writer.
#[derive(Debug, Clone, Copy)]
pub struct JpegCodec {
    /// Encoder quality 1-100. Higher = better quality, larger files.
    pub quality: u8,
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl JpegCodec {
    /// Creates a codec with quality 90.
    pub fn new() -> Self {
        Self::with_quality(DEFAULT_QUALITY)
    }

    /// Creates a codec with the given quality, clamped to 1-100.
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl ImageReader for JpegCodec {
    fn format_name(&self) -> &'static str {
        "JPEG"
    }

    fn can_read(&self, header: &[u8]) -> bool {
        header.starts_with(&JPEG_MAGIC)
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<DecodedImage> {
        let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(Cursor::new(data)));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;
        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

        let (channels, data) = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => (3, pixels),
            jpeg_decoder::PixelFormat::L8 => (1, pixels),
            jpeg_decoder::PixelFormat::L16 => {
                // big-endian samples: keep the high byte
                (1, pixels.chunks_exact(2).map(|s| s[0]).collect())
            }
            jpeg_decoder::PixelFormat::CMYK32 => {
                let rgb = pixels
                    .chunks_exact(4)
                    .flat_map(|cmyk| {
                        let k = 1.0 - cmyk[3] as f32 / 255.0;
                        let ch = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0) as u8;
                        [ch(cmyk[0]), ch(cmyk[1]), ch(cmyk[2])]
                    })
                    .collect();
                (3, rgb)
            }
        };

        Ok(DecodedImage::new(
            info.width as u32,
            info.height as u32,
            channels,
            data,
        ))
    }
}

impl ImageWriter for JpegCodec {
    fn format_name(&self) -> &'static str {
        "JPEG"
    }

    fn write_to_memory(&self, image: &DecodedImage) -> IoResult<Vec<u8>> {
        use jpeg_encoder::{ColorType, Encoder};

        let (Ok(width), Ok(height)) = (u16::try_from(image.width), u16::try_from(image.height))
        else {
            return Err(IoError::EncodeError(format!(
                "{}x{} exceeds the JPEG size limit of 65535",
                image.width, image.height
            )));
        };
        if !(1..=4).contains(&image.channels) {
            return Err(IoError::EncodeError(format!(
                "unsupported channel count: {}",
                image.channels
            )));
        }

        let (color_type, pixels) = if image.channels == 1 {
            (ColorType::Luma, image.data.clone())
        } else {
            (ColorType::Rgb, image.to_rgb())
        };

        let mut buffer = Vec::new();
        Encoder::new(&mut buffer, self.quality)
            .encode(&pixels, width, height, color_type)
            .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;
        Ok(buffer)
    }
}
