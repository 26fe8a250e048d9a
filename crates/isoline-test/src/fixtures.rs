//! Synthetic rasters and stencil sets for regression tests

use crate::error::{TestError, TestResult};
use isoline_core::{Raster, color};
use isoline_io::{RasterFormat, STENCIL_COUNT, stencil_path};
use std::path::Path;

fn fixture<T>(name: &str, result: isoline_core::Result<T>) -> TestResult<T> {
    result.map_err(|e| TestError::Fixture {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Raster filled with a single color.
pub fn uniform_raster(width: u32, height: u32, rgb: (u8, u8, u8)) -> TestResult<Raster> {
    let mut raster = fixture("uniform", Raster::new(width, height))?.into_mut();
    raster.fill_rgb(rgb.0, rgb.1, rgb.2);
    Ok(raster.into())
}

/// Gray ramp, black at the left edge and white at the right edge.
pub fn gradient_raster(width: u32, height: u32) -> TestResult<Raster> {
    let span = width.saturating_sub(1).max(1);
    fixture(
        "gradient",
        Raster::from_rgb_fn(width, height, |x, _| {
            let v = (x * 255 / span) as u8;
            (v, v, v)
        }),
    )
}

/// Black and white checkerboard of `cell x cell` squares, black at the origin.
pub fn checker_raster(width: u32, height: u32, cell: u32) -> TestResult<Raster> {
    let cell = cell.max(1);
    let mut raster = fixture("checker", Raster::new(width, height))?.into_mut();
    raster.fill_rgb(255, 255, 255);
    for y in 0..height {
        for x in (0..width).filter(|x| (x / cell + y / cell) % 2 == 0) {
            fixture("checker", raster.set_rgb(x, y, 0, 0, 0))?;
        }
    }
    Ok(raster.into())
}

/// Color that identifies configuration code `code` in [`coded_stencils`].
///
/// Every channel differs between codes, and none of them is black or white.
pub fn code_color(code: usize) -> (u8, u8, u8) {
    let c = code as u8;
    (10 + c * 15, 240 - c * 15, 100 + c)
}

/// Sixteen `step x step` stencils, stencil `k` filled with [`code_color`]`(k)`.
///
/// A stamped raster can then be decoded back into configuration codes.
pub fn coded_stencils(step: u32) -> TestResult<Vec<Raster>> {
    (0..STENCIL_COUNT)
        .map(|k| uniform_raster(step, step, code_color(k)))
        .collect()
}

/// Decode a pixel of a raster stamped with [`coded_stencils`].
pub fn decode_code(rgb: (u8, u8, u8)) -> Option<usize> {
    (0..STENCIL_COUNT).find(|&k| code_color(k) == rgb)
}

/// Single-threaded contour of `working`: sample every `step` pixels, code
/// each cell and stamp `stencils[code]` over it.
///
/// Serves as the expected output for the parallel pipeline.
pub fn reference_contour(
    working: &Raster,
    stencils: &[Raster],
    step: u32,
    threshold: u8,
) -> TestResult<Raster> {
    let (w, h) = (working.width(), working.height());
    let (rows, cols) = ((h / step) as usize, (w / step) as usize);
    let dark = |x: u32, y: u32| -> usize {
        let (r, g, b) = working.get_rgb(x, y).unwrap_or((255, 255, 255));
        usize::from(color::brightness(r, g, b) <= threshold)
    };

    // the corner stays bright
    let mut grid = vec![vec![0usize; cols + 1]; rows + 1];
    for (i, row) in grid.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            if i == rows && j == cols {
                continue;
            }
            let x = if j == cols { w - 1 } else { j as u32 * step };
            let y = if i == rows { h - 1 } else { i as u32 * step };
            *cell = dark(x, y);
        }
    }

    let mut out = working.to_mut();
    for i in 0..rows {
        for j in 0..cols {
            let code = 8 * grid[i][j] + 4 * grid[i][j + 1] + 2 * grid[i + 1][j + 1] + grid[i + 1][j];
            fixture(
                "reference_contour",
                out.blit(&stencils[code], j as u32 * step, i as u32 * step),
            )?;
        }
    }
    Ok(out.into())
}

/// Write `stencils` as `0.ppm` .. `15.ppm` into `dir`.
pub fn write_stencil_dir<P: AsRef<Path>>(dir: P, stencils: &[Raster]) -> TestResult<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    for (index, stencil) in stencils.iter().enumerate() {
        let path = stencil_path(dir, index);
        isoline_io::write_raster(stencil, &path, RasterFormat::Ppm).map_err(|e| {
            TestError::RasterWrite {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
    }
    Ok(())
}
