//! isoline-contour - Parallel marching-squares contour overlay
//!
//! Given an RGB raster, produce a raster of the same working resolution in
//! which every `step x step` cell is replaced by one of 16 contour stencils,
//! chosen by which corners of the cell fall at or below a brightness cutoff.
//!
//! The work runs on a fixed pool of threads in three barrier-separated
//! phases (rescale, sample, stamp), each task handling a contiguous band of
//! rows computed by [`partition`].
//!
//! # Example
//!
//! ```no_run
//! use isoline_contour::{IsolineOptions, StencilSet, contour_raster};
//!
//! let source = isoline_io::read_raster("in.ppm")?;
//! let stencils = StencilSet::load("./contours")?;
//! let result = contour_raster(source, &stencils, &IsolineOptions::default(), 4)?;
//! isoline_io::write_raster_auto(&result, "out.ppm")?;
//! # Ok::<(), isoline_contour::ContourError>(())
//! ```

pub mod barrier;
pub mod canvas;
mod error;
pub mod grid;
pub mod options;
pub mod partition;
pub mod pipeline;
pub mod rescale;
pub mod stamp;
pub mod stencil;

pub use barrier::PhaseBarrier;
pub use canvas::SharedCanvas;
pub use error::{ContourError, ContourResult};
pub use grid::{BRIGHT, DARK, Grid, classify, sample_boundary_row, sample_rows};
pub use options::IsolineOptions;
pub use partition::partition;
pub use pipeline::{BOUNDARY_TASK, contour_raster, run};
pub use rescale::rescale_rows;
pub use stamp::{config_code, stamp_rows};
pub use stencil::StencilSet;
