//! isoline-io - Raster I/O for the isoline contour filter
//!
//! Supported formats:
//!
//! - PPM: P6 (binary) and P3 (ASCII) read, P6 write
//! - PNG: 8-bit read and RGB write (feature `png-format`)
//!
//! Plus [`read_stencil_dir`] for the contour stencil assets.

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;
pub mod stencil;

pub use error::{IoError, IoResult};
pub use format::{RasterFormat, detect_format_from_bytes};
pub use stencil::{STENCIL_COUNT, read_stencil_dir, stencil_path};

use isoline_core::Raster;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};

/// Read a raster from a file, detecting the format from its magic bytes.
pub fn read_raster<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let data = std::fs::read(path)?;
    read_raster_mem(&data)
}

/// Read a raster from an in-memory file image.
pub fn read_raster_mem(data: &[u8]) -> IoResult<Raster> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "pnm")]
        RasterFormat::Ppm => pnm::read_ppm_mem(data),

        #[cfg(feature = "png-format")]
        RasterFormat::Png => png::read_png(BufReader::new(Cursor::new(data))),

        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write a raster to a file in the given format.
///
/// The raster is encoded into a temporary file next to `path` that is
/// renamed over `path` only once encoding has finished, so a failed write
/// leaves any existing file at `path` untouched.
pub fn write_raster<P: AsRef<Path>>(
    raster: &Raster,
    path: P,
    format: RasterFormat,
) -> IoResult<()> {
    let path = path.as_ref();
    let tmp = temp_path(path);
    let result = write_raster_file(raster, &tmp, format).and_then(|()| {
        std::fs::rename(&tmp, path)?;
        Ok(())
    });
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

/// Sibling of `path` used while the file is being written.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

fn write_raster_file(raster: &Raster, path: &Path, format: RasterFormat) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    match format {
        #[cfg(feature = "pnm")]
        RasterFormat::Ppm => pnm::write_ppm(raster, &mut writer)?,

        #[cfg(feature = "png-format")]
        RasterFormat::Png => png::write_png(raster, &mut writer)?,

        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )));
        }
    }
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

/// Write a raster, choosing the format from the path's extension.
pub fn write_raster_auto<P: AsRef<Path>>(raster: &Raster, path: P) -> IoResult<()> {
    let format = RasterFormat::from_path(&path);
    write_raster(raster, path, format)
}
