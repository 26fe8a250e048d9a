//! PPM (portable pixmap) format support
//!
//! Reads binary P6 and ASCII P3 pixmaps with a maxval of at most 255, and
//! writes binary P6. Header fields may be separated by any whitespace and
//! interleaved with `#` comments.

use crate::{IoError, IoResult};
use isoline_core::{Raster, color};
use std::io::{Read, Write};

/// Parsed PPM header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PpmHeader {
    binary: bool,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Byte cursor over an in-memory PPM file
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Skip whitespace and comments up to the next token.
    fn skip_separators(&mut self) {
        while self.pos < self.data.len() {
            match self.data[self.pos] {
                b'#' => {
                    while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                b if b.is_ascii_whitespace() => self.pos += 1,
                _ => break,
            }
        }
    }

    fn next_uint(&mut self, what: &str) -> IoResult<u32> {
        self.skip_separators();
        let start = self.pos;
        while self.pos < self.data.len() && self.data[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData(format!("PPM: missing {}", what)));
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData(format!("PPM: {} out of range", what)))
    }
}

fn read_header(cur: &mut Cursor<'_>) -> IoResult<PpmHeader> {
    let binary = match cur.data.get(..2) {
        Some(b"P6") => true,
        Some(b"P3") => false,
        _ => return Err(IoError::InvalidData("not a PPM file".to_string())),
    };
    cur.pos = 2;

    let width = cur.next_uint("width")?;
    let height = cur.next_uint("height")?;
    let maxval = cur.next_uint("maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PPM maxval {} (only 1..=255 supported)",
            maxval
        )));
    }

    if binary {
        // exactly one whitespace byte separates the header from the samples
        match cur.data.get(cur.pos) {
            Some(b) if b.is_ascii_whitespace() => cur.pos += 1,
            _ => {
                return Err(IoError::InvalidData(
                    "PPM: missing separator after maxval".to_string(),
                ));
            }
        }
    }

    Ok(PpmHeader {
        binary,
        width,
        height,
        maxval,
    })
}

#[inline]
fn rescale_sample(v: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        v.min(255) as u8
    } else {
        ((v.min(maxval) * 255 + maxval / 2) / maxval) as u8
    }
}

/// Read a PPM image (P3/P6) from a reader.
pub fn read_ppm<R: Read>(mut reader: R) -> IoResult<Raster> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    read_ppm_mem(&data)
}

/// Read a PPM image from an in-memory buffer.
pub fn read_ppm_mem(data: &[u8]) -> IoResult<Raster> {
    let mut cur = Cursor::new(data);
    let header = read_header(&mut cur)?;
    let npixels = header.width as usize * header.height as usize;

    // the file must hold every sample before any pixel memory is reserved
    let body = &data[cur.pos..];
    let min_body = if header.binary {
        npixels.checked_mul(3)
    } else {
        // three samples per pixel, each a digit plus a separator
        npixels.checked_mul(6).map(|n| n.saturating_sub(1))
    };
    match min_body {
        Some(n) if body.len() >= n => {}
        _ => {
            return Err(IoError::InvalidData(format!(
                "PPM: {}x{} image needs more than the {} sample bytes present",
                header.width,
                header.height,
                body.len()
            )));
        }
    }

    let mut samples = Vec::new();
    samples
        .try_reserve_exact(npixels)
        .map_err(|_| isoline_core::Error::AllocationFailed(npixels))?;

    if header.binary {
        samples.extend(body.chunks_exact(3).take(npixels).map(|px| {
            color::compose_rgb(
                rescale_sample(px[0] as u32, header.maxval),
                rescale_sample(px[1] as u32, header.maxval),
                rescale_sample(px[2] as u32, header.maxval),
            )
        }));
    } else {
        for _ in 0..npixels {
            let r = cur.next_uint("red sample")?;
            let g = cur.next_uint("green sample")?;
            let b = cur.next_uint("blue sample")?;
            samples.push(color::compose_rgb(
                rescale_sample(r, header.maxval),
                rescale_sample(g, header.maxval),
                rescale_sample(b, header.maxval),
            ));
        }
    }

    Ok(Raster::from_packed(header.width, header.height, samples)?)
}

/// Write a raster as binary PPM (P6) to a writer.
pub fn write_ppm<W: Write>(raster: &Raster, mut writer: W) -> IoResult<()> {
    write!(writer, "P6\n{} {}\n255\n", raster.width(), raster.height())?;
    let mut row = Vec::with_capacity(raster.width() as usize * 3);
    for y in 0..raster.height() {
        row.clear();
        for &px in raster.row_data(y) {
            let (r, g, b) = color::extract_rgb(px);
            row.extend_from_slice(&[r, g, b]);
        }
        writer.write_all(&row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_binary_with_comment() {
        let mut data = b"P6\n# made by hand\n2 1\n255\n".to_vec();
        data.extend_from_slice(&[1, 2, 3, 250, 251, 252]);
        let r = read_ppm_mem(&data).unwrap();
        assert_eq!((r.width(), r.height()), (2, 1));
        assert_eq!(r.get_rgb(0, 0), Some((1, 2, 3)));
        assert_eq!(r.get_rgb(1, 0), Some((250, 251, 252)));
    }

    #[test]
    fn test_read_ascii() {
        let data = b"P3\n2 2 255\n0 0 0  10 20 30\n255 255 255\n1 1 1\n";
        let r = read_ppm_mem(data).unwrap();
        assert_eq!(r.get_rgb(1, 0), Some((10, 20, 30)));
        assert_eq!(r.get_rgb(0, 1), Some((255, 255, 255)));
        assert_eq!(r.get_rgb(1, 1), Some((1, 1, 1)));
    }

    #[test]
    fn test_read_scales_small_maxval() {
        let data = b"P3 1 1 15 15 0 7";
        let r = read_ppm_mem(data).unwrap();
        assert_eq!(r.get_rgb(0, 0), Some((255, 0, 119)));
    }

    #[test]
    fn test_read_truncated_body() {
        let mut data = b"P6 2 2 255\n".to_vec();
        data.extend_from_slice(&[0; 11]);
        assert!(matches!(read_ppm_mem(&data), Err(IoError::InvalidData(_))));
    }

    #[test]
    fn test_oversized_header_is_invalid_data() {
        // claims 65535x65535 but carries a single pixel
        assert!(matches!(
            read_ppm_mem(b"P6 65535 65535 255\n\0\0\0"),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_ppm_mem(b"P3 40000 40000 255 1 2 3"),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_read_rejects_wide_maxval() {
        assert!(matches!(
            read_ppm_mem(b"P6 1 1 65535\n\0\0\0\0\0\0"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_read_rejects_zero_size() {
        assert!(matches!(
            read_ppm_mem(b"P6 0 4 255\n"),
            Err(IoError::Core(isoline_core::Error::InvalidDimension { .. }))
        ));
    }

    #[test]
    fn test_write_then_read() {
        let r = Raster::from_rgb_fn(3, 2, |x, y| (x as u8 * 40, y as u8 * 90, 7)).unwrap();
        let mut buf = Vec::new();
        write_ppm(&r, &mut buf).unwrap();
        assert!(buf.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(buf.len(), 11 + 3 * 2 * 3);
        assert!(read_ppm_mem(&buf).unwrap().equals(&r));
    }
}
