//! Isoline Core - Basic data structures for the contour filter
//!
//! This crate provides the in-memory raster types shared by the other
//! isoline crates:
//!
//! - [`Raster`] / [`RasterMut`] - The RGB image container (immutable / mutable)
//! - [`color`] - Packed-pixel helpers and the brightness measure used for
//!   thresholding

pub mod error;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{Raster, RasterMut};

/// Color channel helpers for packed 32-bit RGB pixels.
///
/// # Pixel format
///
/// Pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB). The filter
/// only handles opaque RGB, so alpha is always written as 255.
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a packed pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a packed pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a packed pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Compose a packed RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Extract RGB values from a packed pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Average brightness of an RGB triple, `(r + g + b) / 3` with integer
    /// division.
    #[inline]
    pub fn brightness(r: u8, g: u8, b: u8) -> u8 {
        ((r as u16 + g as u16 + b as u16) / 3) as u8
    }

    /// Brightness of a packed pixel.
    #[inline]
    pub fn pixel_brightness(pixel: u32) -> u8 {
        let (r, g, b) = extract_rgb(pixel);
        brightness(r, g, b)
    }

}
