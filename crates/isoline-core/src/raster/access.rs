//! Pixel access functions
//!
//! Getting and setting individual RGB pixels, plus rectangular copies.

use super::{Raster, RasterMut};
use crate::color;
use crate::error::{Error, Result};

impl Raster {
    /// Get the packed pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[y as usize * self.inner.width as usize + x as usize])
    }

    /// Get RGB values at (x, y).
    #[inline]
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Get RGB values with coordinates clamped to the raster edge.
    #[inline]
    pub fn get_rgb_clamped(&self, x: i64, y: i64) -> (u8, u8, u8) {
        let x = x.clamp(0, self.inner.width as i64 - 1) as u32;
        let y = y.clamp(0, self.inner.height as i64 - 1) as u32;
        color::extract_rgb(self.inner.data[y as usize * self.inner.width as usize + x as usize])
    }
}

impl RasterMut {
    /// Get RGB values at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(color::extract_rgb(
            self.inner.data[y as usize * self.inner.width as usize + x as usize],
        ))
    }

    /// Set RGB values at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(self.out_of_bounds(x, y));
        }
        self.inner.data[y as usize * self.inner.width as usize + x as usize] = color::compose_rgb(r, g, b);
        Ok(())
    }

    /// Fill the whole raster with one color.
    pub fn fill_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.inner.data.fill(color::compose_rgb(r, g, b));
    }

    /// Copy `src` into this raster with its top-left corner at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `src` does not fit entirely.
    pub fn blit(&mut self, src: &Raster, x: u32, y: u32) -> Result<()> {
        let right = x as u64 + src.width() as u64;
        let bottom = y as u64 + src.height() as u64;
        if right > self.inner.width as u64 || bottom > self.inner.height as u64 {
            return Err(self.out_of_bounds(x, y));
        }
        let w = self.inner.width as usize;
        for sy in 0..src.height() {
            let start = (y + sy) as usize * w + x as usize;
            self.inner.data[start..start + src.width() as usize]
                .copy_from_slice(src.row_data(sy));
        }
        Ok(())
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> Error {
        Error::OutOfBounds {
            x,
            y,
            width: self.inner.width,
            height: self.inner.height,
        }
    }
}
