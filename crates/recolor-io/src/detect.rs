//! PNG/JPEG recognition.
//!
//! Content wins over the file name: a PNG saved as `photo.jpg` still reads
//! as PNG.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PNG signature.
pub const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// JPEG start-of-image marker followed by a marker prefix.
pub const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Image container formats known to the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// Anything else.
    Unknown,
}

impl Format {
    /// Format of the file at `path`: magic bytes if the file is readable and
    /// recognised, the extension otherwise.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        match Self::from_magic_bytes(path) {
            Ok(format) if format != Format::Unknown => Ok(format),
            _ => Ok(Self::from_extension(path)),
        }
    }

    /// Format implied by the extension, case-insensitive.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") | Some("jpe") | Some("jfif") => Format::Jpeg,
            _ => Format::Unknown,
        }
    }

    /// Format implied by the first bytes of the file.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; 8];

        let bytes_read = file.read(&mut header)?;
        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from raw bytes (magic number check).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&PNG_MAGIC) {
            Format::Png
        } else if bytes.starts_with(&JPEG_MAGIC) {
            Format::Jpeg
        } else {
            Format::Unknown
        }
    }

    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Jpeg => "jpg",
            Format::Unknown => "",
        }
    }

    /// Returns the display name of this format.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Png => "PNG",
            Format::Jpeg => "JPEG",
            Format::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
