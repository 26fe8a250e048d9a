//! Contour stencil set
//!
//! Sixteen equally sized rasters, indexed by the 4-bit configuration code of
//! a grid cell. Loaded once per run and shared read-only by every task.

use crate::error::{ContourError, ContourResult};
use isoline_core::Raster;
use isoline_io::STENCIL_COUNT;
use std::path::Path;

/// The 16 marching-squares stencils.
#[derive(Debug, Clone)]
pub struct StencilSet {
    stencils: Vec<Raster>,
}

impl StencilSet {
    /// Build a set from exactly 16 rasters of identical size, in code order.
    ///
    /// # Errors
    ///
    /// Returns [`ContourError::StencilCount`] for any other count, and
    /// [`ContourError::StencilSize`] for the first stencil whose size differs
    /// from stencil 0.
    pub fn new(stencils: Vec<Raster>) -> ContourResult<Self> {
        if stencils.len() != STENCIL_COUNT {
            return Err(ContourError::StencilCount(stencils.len()));
        }
        let expected = (stencils[0].width(), stencils[0].height());
        if let Some((index, s)) = stencils
            .iter()
            .enumerate()
            .find(|(_, s)| (s.width(), s.height()) != expected)
        {
            return Err(ContourError::StencilSize {
                index,
                expected,
                actual: (s.width(), s.height()),
            });
        }
        Ok(Self { stencils })
    }

    /// Load `<dir>/0.ppm` .. `<dir>/15.ppm`.
    pub fn load<P: AsRef<Path>>(dir: P) -> ContourResult<Self> {
        Self::new(isoline_io::read_stencil_dir(dir)?)
    }

    /// Stencil for configuration `code`.
    ///
    /// # Panics
    ///
    /// Panics if `code >= 16`.
    #[inline]
    pub fn get(&self, code: usize) -> &Raster {
        &self.stencils[code]
    }

    /// Width shared by all stencils.
    pub fn width(&self) -> u32 {
        self.stencils[0].width()
    }

    /// Height shared by all stencils.
    pub fn height(&self) -> u32 {
        self.stencils[0].height()
    }

    /// Check that every stencil covers exactly one `step_x x step_y` cell.
    pub fn check_cell_size(&self, step_x: u32, step_y: u32) -> ContourResult<()> {
        if (self.width(), self.height()) != (step_x, step_y) {
            return Err(ContourError::StencilSize {
                index: 0,
                expected: (step_x, step_y),
                actual: (self.width(), self.height()),
            });
        }
        Ok(())
    }
}
