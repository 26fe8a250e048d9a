//! Contour stamping
//!
//! Each grid cell `(i, j)` takes its configuration code from the four
//! corners of its 2x2 neighborhood, clockwise from the top-left:
//!
//! ```text
//!   (i, j) 8 ---- 4 (i, j+1)
//!          |      |
//! (i+1, j) 1 ---- 2 (i+1, j+1)
//! ```
//!
//! and the stencil for that code replaces the cell's pixels.

use crate::canvas::SharedCanvas;
use crate::grid::Grid;
use crate::stencil::StencilSet;
use std::ops::Range;

/// 4-bit configuration code of cell (i, j); needs `i < rows`, `j < cols`.
#[inline]
pub fn config_code(grid: &Grid, i: usize, j: usize) -> usize {
    8 * grid.get(i, j) as usize
        + 4 * grid.get(i, j + 1) as usize
        + 2 * grid.get(i + 1, j + 1) as usize
        + grid.get(i + 1, j) as usize
}

/// Stamp every cell of grid rows `rows` into the canvas.
///
/// Row `i` covers pixel rows `i * step_y .. (i + 1) * step_y`, so disjoint
/// grid row ranges write disjoint pixels.
pub fn stamp_rows(
    canvas: &SharedCanvas,
    grid: &Grid,
    stencils: &StencilSet,
    rows: Range<usize>,
    step_x: u32,
    step_y: u32,
) {
    for i in rows {
        for j in 0..grid.cols() {
            let code = config_code(grid, i, j);
            canvas.blit(stencils.get(code), j as u32 * step_x, i as u32 * step_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{sample_boundary_row, sample_rows};
    use isoline_core::Raster;

    /// 16x16 raster, step 8: a 2x2 grid plus boundary, corners set by `dark`.
    fn grid_from(dark: [[bool; 3]; 3]) -> (SharedCanvas, Grid) {
        let src = Raster::from_rgb_fn(17, 17, |x, y| {
            let (i, j) = ((y / 8) as usize, (x / 8) as usize);
            if x % 8 == 0 && y % 8 == 0 && dark[i][j] { (0, 0, 0) } else { (255, 255, 255) }
        })
        .unwrap();
        let canvas = SharedCanvas::from_raster_mut(src.into_mut());
        let grid = Grid::for_raster(17, 17, 8, 8).unwrap();
        sample_rows(&canvas, &grid, 0..grid.rows(), 8, 8, 200);
        sample_boundary_row(&canvas, &grid, 8, 200);
        (canvas, grid)
    }

    #[test]
    fn test_code_weights() {
        let cases = [
            ([[true, false, false], [false, false, false], [false, false, false]], 8),
            ([[false, true, false], [false, false, false], [false, false, false]], 4),
            ([[false, false, false], [false, true, false], [false, false, false]], 2),
            ([[false, false, false], [true, false, false], [false, false, false]], 1),
            ([[true, true, false], [true, true, false], [false, false, false]], 15),
            ([[false, false, false], [false, false, false], [false, false, false]], 0),
        ];
        for (dark, expected) in cases {
            let (_, grid) = grid_from(dark);
            assert_eq!(config_code(&grid, 0, 0), expected, "{dark:?}");
        }
    }

    #[test]
    fn test_stamp_places_matching_stencil() {
        let stencils = StencilSet::new(
            (0..16)
                .map(|k| Raster::from_rgb_fn(8, 8, |x, y| (k as u8, x as u8, y as u8)).unwrap())
                .collect(),
        )
        .unwrap();
        // only the center sample point (1, 1) is dark
        let (canvas, grid) = grid_from([
            [false, false, false],
            [false, true, false],
            [false, false, false],
        ]);
        stamp_rows(&canvas, &grid, &stencils, 0..grid.rows(), 8, 8);
        let out = canvas.into_raster().unwrap();
        // (1,1) is bottom-right of cell (0,0), bottom-left of (0,1), ...
        assert_eq!(out.get_rgb(0, 0), Some((2, 0, 0)));
        assert_eq!(out.get_rgb(8 + 3, 5), Some((1, 3, 5)));
        assert_eq!(out.get_rgb(7, 8 + 7), Some((4, 7, 7)));
        assert_eq!(out.get_rgb(15, 15), Some((8, 7, 7)));
        // the boundary pixel column is never stamped
        assert_eq!(out.get_rgb(16, 3), Some((255, 255, 255)));
    }
}
