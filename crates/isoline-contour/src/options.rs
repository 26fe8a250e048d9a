//! Filter parameters
//!
//! The filter runs with fixed constants: 8-pixel cells, a brightness cutoff
//! of 200 and a 2048x2048 working resolution. [`IsolineOptions::default`]
//! carries them; the builder methods exist for library callers working with
//! small rasters and stencils.

use crate::error::{ContourError, ContourResult};

/// Side of a grid cell, and of each stencil, in pixels
pub const DEFAULT_STEP: u32 = 8;

/// Brightness at or below which a sample point counts as dark
pub const DEFAULT_THRESHOLD: u8 = 200;

/// Working resolution for sources larger than it
pub const DEFAULT_RESCALE_WIDTH: u32 = 2048;
pub const DEFAULT_RESCALE_HEIGHT: u32 = 2048;

/// Parameters of one contour run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsolineOptions {
    /// Horizontal distance between sample points (stencil width)
    pub step_x: u32,
    /// Vertical distance between sample points (stencil height)
    pub step_y: u32,
    /// Brightness cutoff; `brightness <= threshold` is dark
    pub threshold: u8,
    /// Working raster width when the source must be downscaled
    pub rescale_width: u32,
    /// Working raster height when the source must be downscaled
    pub rescale_height: u32,
}

impl Default for IsolineOptions {
    fn default() -> Self {
        Self {
            step_x: DEFAULT_STEP,
            step_y: DEFAULT_STEP,
            threshold: DEFAULT_THRESHOLD,
            rescale_width: DEFAULT_RESCALE_WIDTH,
            rescale_height: DEFAULT_RESCALE_HEIGHT,
        }
    }
}

impl IsolineOptions {
    /// Use square cells of `step` pixels.
    pub fn with_step(mut self, step: u32) -> Self {
        self.step_x = step;
        self.step_y = step;
        self
    }

    /// Use a different working resolution.
    pub fn with_rescale(mut self, width: u32, height: u32) -> Self {
        self.rescale_width = width;
        self.rescale_height = height;
        self
    }

    /// Check that steps and working resolution are positive.
    pub fn validate(&self) -> ContourResult<()> {
        if self.step_x == 0 {
            return Err(ContourError::InvalidStep(self.step_x));
        }
        if self.step_y == 0 {
            return Err(ContourError::InvalidStep(self.step_y));
        }
        if self.rescale_width == 0 || self.rescale_height == 0 {
            return Err(isoline_core::Error::InvalidDimension {
                width: self.rescale_width,
                height: self.rescale_height,
            }
            .into());
        }
        Ok(())
    }
}
