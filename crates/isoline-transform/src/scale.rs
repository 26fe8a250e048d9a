//! Image scaling
//!
//! Output pixel `(x, y)` of a `width x height` resize samples the source at
//! `u = x / (width - 1)`, `v = y / (height - 1)`, so the first and last
//! output columns/rows land on the source's edges.

use crate::bicubic::sample_bicubic;
use crate::{TransformError, TransformResult};
use isoline_core::{Raster, color};

/// Normalized coordinate of output index `i` along an axis of `n` samples.
#[inline]
pub fn normalized_coord(i: u32, n: u32) -> f32 {
    if n <= 1 {
        0.0
    } else {
        i as f32 / (n - 1) as f32
    }
}

/// Compute output row `y` of a `width x height` bicubic resize of `src`
/// into `out` as packed pixels.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] if `out.len() != width` or
/// `y >= height`.
pub fn resample_row(
    src: &Raster,
    width: u32,
    height: u32,
    y: u32,
    out: &mut [u32],
) -> TransformResult<()> {
    if out.len() != width as usize || y >= height {
        return Err(TransformError::InvalidParameters(format!(
            "row {} of {}x{} into buffer of {}",
            y,
            width,
            height,
            out.len()
        )));
    }
    let v = normalized_coord(y, height);
    for (x, px) in out.iter_mut().enumerate() {
        let u = normalized_coord(x as u32, width);
        let (r, g, b) = sample_bicubic(src, u, v);
        *px = color::compose_rgb(r, g, b);
    }
    Ok(())
}

/// Resize `src` to exactly `width x height` with bicubic sampling.
pub fn scale_to_size(src: &Raster, width: u32, height: u32) -> TransformResult<Raster> {
    let mut dst = Raster::new(width, height)?.into_mut();
    for (y, row) in dst.data_mut().chunks_exact_mut(width as usize).enumerate() {
        resample_row(src, width, height, y as u32, row)?;
    }
    Ok(dst.into())
}
