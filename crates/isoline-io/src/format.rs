//! Raster format detection
//!
//! Detects formats by examining magic numbers in the file header, and picks
//! an output format from a destination path's extension.

use crate::{IoError, IoResult};
use std::path::Path;

/// Raster file formats understood by the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RasterFormat {
    /// Portable pixmap (P3 ASCII on read, P6 binary on read and write)
    #[default]
    Ppm,
    /// PNG, 8 bits per channel
    Png,
}

impl RasterFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Ppm => "ppm",
            Self::Png => "png",
        }
    }

    /// Choose the output format for a destination path.
    ///
    /// `.png` (any case) selects PNG; everything else is written as PPM.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => Self::Png,
            _ => Self::Ppm,
        }
    }
}

/// Magic numbers for format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// PPM formats
    pub const PPM_ASCII: &[u8] = b"P3";
    pub const PPM_BINARY: &[u8] = b"P6";
}

/// Detect the raster format from the leading bytes of a file
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<RasterFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.len() >= 8 && data.starts_with(magic::PNG) {
        return Ok(RasterFormat::Png);
    }

    if data.starts_with(magic::PPM_BINARY) || data.starts_with(magic::PPM_ASCII) {
        return Ok(RasterFormat::Ppm);
    }

    Err(IoError::UnsupportedFormat(format!(
        "unrecognized magic {:02x?}",
        &data[..data.len().min(4)]
    )))
}
