//! Rescale stage
//!
//! Fills output rows of the working canvas by bicubic sampling of the
//! full-resolution source raster.

use crate::canvas::SharedCanvas;
use crate::error::ContourResult;
use isoline_core::Raster;
use isoline_transform::resample_row;
use std::ops::Range;

/// Resample working-canvas rows `rows` from `source`.
pub fn rescale_rows(source: &Raster, canvas: &SharedCanvas, rows: Range<usize>) -> ContourResult<()> {
    let mut row = vec![0u32; canvas.width() as usize];
    for y in rows {
        let y = y as u32;
        resample_row(source, canvas.width(), canvas.height(), y, &mut row)?;
        canvas.store_span(0, y, &row);
    }
    Ok(())
}
