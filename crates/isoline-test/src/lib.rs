//! isoline-test - Regression test framework for the isoline crates
//!
//! A [`RegParams`] value numbers each check, records failures instead of
//! panicking on the first one, and reports everything in
//! [`RegParams::cleanup`].
//!
//! # Usage
//!
//! ```ignore
//! use isoline_test::RegParams;
//!
//! let mut rp = RegParams::new("grid");
//! rp.compare_values(257.0, grid.rows() as f64 + 1.0, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Rasters written with [`RegParams::write_raster`] land in `tests/regout/`
//! at the workspace root for visual inspection.

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // isoline-test is at crates/isoline-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Create (if needed) and return a scratch directory under regout for one
/// test, e.g. for stencil assets or CLI input files.
pub fn scratch_dir(test_name: &str) -> TestResult<String> {
    let dir = format!("{}/{}", regout_dir(), test_name);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
