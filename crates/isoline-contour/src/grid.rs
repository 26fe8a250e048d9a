//! Sample grid
//!
//! A binary `(rows + 1) x (cols + 1)` matrix, `rows = height / step_y`,
//! `cols = width / step_x`. Cell `(i, j)` holds the classification of the
//! working-raster pixel at `x = j * step_x`, `y = i * step_y`. The extra last
//! column samples the raster's last pixel column, the extra last row its
//! last pixel row, and the corner `(rows, cols)` is always bright.

use crate::canvas::SharedCanvas;
use crate::error::ContourResult;
use std::ops::Range;
use std::sync::atomic::{AtomicU8, Ordering};

/// Sample point brighter than the threshold
pub const BRIGHT: u8 = 0;
/// Sample point at or below the threshold
pub const DARK: u8 = 1;

/// Classify one brightness value.
#[inline]
pub fn classify(brightness: u8, threshold: u8) -> u8 {
    if brightness > threshold { BRIGHT } else { DARK }
}

/// Binary occupancy grid shared by all tasks of a run.
#[derive(Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<AtomicU8>,
}

impl Grid {
    /// Allocate a grid with `rows x cols` cells plus the boundary row and
    /// column, all bright.
    pub fn new(rows: usize, cols: usize) -> ContourResult<Self> {
        let len = (rows + 1) * (cols + 1);
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| isoline_core::Error::AllocationFailed(len))?;
        cells.extend((0..len).map(|_| AtomicU8::new(BRIGHT)));
        Ok(Self { rows, cols, cells })
    }

    /// Allocate the grid for a `width x height` working raster.
    pub fn for_raster(width: u32, height: u32, step_x: u32, step_y: u32) -> ContourResult<Self> {
        Self::new((height / step_y) as usize, (width / step_x) as usize)
    }

    /// Number of cell rows, excluding the boundary row.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns, excluding the boundary column.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i <= self.rows && j <= self.cols);
        i * (self.cols + 1) + j
    }

    /// Value of cell (i, j); `i <= rows`, `j <= cols`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u8 {
        self.cells[self.index(i, j)].load(Ordering::Relaxed)
    }

    #[inline]
    fn set(&self, i: usize, j: usize, value: u8) {
        self.cells[self.index(i, j)].store(value, Ordering::Relaxed);
    }

    /// Copy of all `(rows + 1) * (cols + 1)` cells, row-major.
    pub fn snapshot(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.load(Ordering::Relaxed)).collect()
    }
}

/// Sample grid rows `rows` (a sub-range of `0..grid.rows()`), including
/// their boundary-column cells.
pub fn sample_rows(
    canvas: &SharedCanvas,
    grid: &Grid,
    rows: Range<usize>,
    step_x: u32,
    step_y: u32,
    threshold: u8,
) {
    let last_x = canvas.width() - 1;
    for i in rows {
        let y = i as u32 * step_y;
        for j in 0..grid.cols() {
            let x = j as u32 * step_x;
            grid.set(i, j, classify(canvas.brightness(x, y), threshold));
        }
        grid.set(i, grid.cols(), classify(canvas.brightness(last_x, y), threshold));
    }
}

/// Sample the boundary row from the raster's last pixel row and clear the
/// corner cell. Run by exactly one task.
pub fn sample_boundary_row(canvas: &SharedCanvas, grid: &Grid, step_x: u32, threshold: u8) {
    let last_y = canvas.height() - 1;
    for j in 0..grid.cols() {
        let x = j as u32 * step_x;
        grid.set(grid.rows(), j, classify(canvas.brightness(x, last_y), threshold));
    }
    grid.set(grid.rows(), grid.cols(), BRIGHT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use isoline_core::Raster;

    #[test]
    fn test_classify_boundary() {
        assert_eq!(classify(200, 200), DARK);
        assert_eq!(classify(201, 200), BRIGHT);
        assert_eq!(classify(0, 200), DARK);
    }

    #[test]
    fn test_dimensions() {
        let g = Grid::for_raster(2048, 2048, 8, 8).unwrap();
        assert_eq!((g.rows(), g.cols()), (256, 256));
        assert_eq!(g.snapshot().len(), 257 * 257);
        let g = Grid::for_raster(20, 13, 8, 4).unwrap();
        assert_eq!((g.rows(), g.cols()), (3, 2));
    }

    fn sample_all(canvas: &SharedCanvas, tasks: usize) -> Vec<u8> {
        let grid = Grid::for_raster(canvas.width(), canvas.height(), 8, 8).unwrap();
        for task in 0..tasks {
            let rows = crate::partition::partition(task, tasks, grid.rows());
            sample_rows(canvas, &grid, rows, 8, 8, 200);
        }
        sample_boundary_row(canvas, &grid, 8, 200);
        grid.snapshot()
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let src = Raster::from_rgb_fn(83, 61, |x, y| {
            let v = ((x * 37 + y * 11) % 256) as u8;
            (v, v, v)
        })
        .unwrap();
        let canvas = SharedCanvas::from_raster_mut(src.into_mut());

        let first = sample_all(&canvas, 1);
        let again = sample_all(&canvas, 1);
        assert_eq!(first, again);
        assert_eq!(first.len(), (7 + 1) * (10 + 1));
        assert!(first.contains(&DARK) && first.contains(&BRIGHT));

        // five partitions of the row range give the same grid
        assert_eq!(sample_all(&canvas, 5), first);
    }

    #[test]
    fn test_boundary_sampling_uses_last_row_and_column() {
        // 17x17 with step 8: samples at 0, 8 and the boundary at 16
        let src = Raster::from_rgb_fn(17, 17, |x, y| {
            if x == 16 || y == 16 { (0, 0, 0) } else { (255, 255, 255) }
        })
        .unwrap();
        let canvas = SharedCanvas::from_raster_mut(src.into_mut());
        let grid = Grid::for_raster(17, 17, 8, 8).unwrap();
        sample_rows(&canvas, &grid, 0..grid.rows(), 8, 8, 200);
        sample_boundary_row(&canvas, &grid, 8, 200);

        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(grid.get(i, j), BRIGHT);
            }
            assert_eq!(grid.get(i, 2), DARK, "boundary column, row {i}");
            assert_eq!(grid.get(2, i), DARK, "boundary row, col {i}");
        }
        // the corner is bright even though the corner pixel is dark
        assert_eq!(grid.get(2, 2), BRIGHT);
    }

    #[test]
    fn test_boundary_column_on_non_multiple_width() {
        // width 12 -> cols 1, boundary column samples x = 11, not x = 8
        let src = Raster::from_rgb_fn(12, 8, |x, _| if x == 11 { (10, 10, 10) } else { (250, 250, 250) })
            .unwrap();
        let canvas = SharedCanvas::from_raster_mut(src.into_mut());
        let grid = Grid::for_raster(12, 8, 8, 8).unwrap();
        sample_rows(&canvas, &grid, 0..1, 8, 8, 200);
        assert_eq!(grid.get(0, 0), BRIGHT);
        assert_eq!(grid.get(0, 1), DARK);
    }
}
