//! Contour stencil directory loading
//!
//! The 16 marching-squares stencils live in one directory as `0.ppm`
//! through `15.ppm`, indexed by configuration code.

use crate::{IoError, IoResult, read_raster};
use isoline_core::Raster;
use std::path::Path;

/// Number of stencils, one per 4-bit configuration code
pub const STENCIL_COUNT: usize = 16;

/// Path of the stencil for configuration `index` inside `dir`.
pub fn stencil_path<P: AsRef<Path>>(dir: P, index: usize) -> std::path::PathBuf {
    dir.as_ref().join(format!("{}.ppm", index))
}

/// Read the 16 stencils `<dir>/0.ppm` .. `<dir>/15.ppm` in code order.
///
/// Dimensions are not checked here; see `StencilSet::new` in
/// isoline-contour for that.
///
/// # Errors
///
/// Returns [`IoError::Stencil`] naming the first stencil that is missing or
/// malformed.
pub fn read_stencil_dir<P: AsRef<Path>>(dir: P) -> IoResult<Vec<Raster>> {
    let dir = dir.as_ref();
    (0..STENCIL_COUNT)
        .map(|index| {
            let path = stencil_path(dir, index);
            read_raster(&path).map_err(|e| IoError::Stencil {
                index,
                path: path.clone(),
                source: Box::new(e),
            })
        })
        .collect()
}
