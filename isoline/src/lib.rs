//! Isoline - Parallel marching-squares contour filter for raster images
//!
//! The filter rescales an input raster to a fixed working resolution,
//! classifies a regular grid of sample points as dark or bright, and
//! replaces every grid cell with one of sixteen stencil tiles chosen by the
//! cell's corner pattern. All three phases run on a pool of worker threads
//! separated by barriers.
//!
//! # Example
//!
//! ```
//! use isoline::{IsolineOptions, Raster, StencilSet, contour_raster};
//!
//! let stencils = StencilSet::new(
//!     (0..16)
//!         .map(|k| Raster::from_rgb_fn(8, 8, |_, _| (k * 10, 0, 0)).unwrap())
//!         .collect(),
//! )
//! .unwrap();
//! let src = Raster::from_rgb_fn(64, 48, |x, _| if x < 32 { (0, 0, 0) } else { (255, 255, 255) })
//!     .unwrap();
//!
//! let out = contour_raster(src, &stencils, &IsolineOptions::default(), 4).unwrap();
//! assert_eq!((out.width(), out.height()), (64, 48));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use isoline_core::*;

// Pipeline entry points
pub use isoline_contour::{ContourError, IsolineOptions, StencilSet, contour_raster, run};

// Re-export domain crates as modules to avoid name conflicts
pub use isoline_contour as contour;
pub use isoline_io as io;
pub use isoline_transform as transform;
