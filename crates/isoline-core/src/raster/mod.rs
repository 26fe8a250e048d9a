//! Raster - The RGB image container
//!
//! # Pixel layout
//!
//! - Pixels are stored row-major in a single buffer, one 32-bit word each
//! - Color order is RGBA (red in MSB), alpha is always 255
//! - `data.len() == width * height`
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `RasterMut` via [`Raster::try_into_mut`]
//! or [`Raster::to_mut`], then convert back with `Into<Raster>`.

mod access;

use crate::color;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal raster data shared by [`Raster`] and [`RasterMut`].
#[derive(Debug, Clone)]
struct RasterData {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl RasterData {
    fn alloc(width: u32, height: u32, fill: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::AllocationFailed(len))?;
        data.resize(len, fill);
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

/// Immutable RGB raster
///
/// # Examples
///
/// ```
/// use isoline_core::Raster;
///
/// let raster = Raster::new(640, 480).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.get_rgb(0, 0), Some((0, 0, 0)));
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new black raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, and
    /// [`Error::AllocationFailed`] if the pixel buffer cannot be reserved.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let inner = RasterData::alloc(width, height, color::compose_rgb(0, 0, 0))?;
        Ok(Raster {
            inner: Arc::new(inner),
        })
    }

    /// Create a raster whose pixel at `(x, y)` is `f(x, y)`.
    pub fn from_rgb_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> (u8, u8, u8),
    {
        let mut inner = RasterData::alloc(width, height, 0)?;
        for y in 0..height {
            let start = y as usize * width as usize;
            let row = &mut inner.data[start..start + width as usize];
            for (x, px) in row.iter_mut().enumerate() {
                let (r, g, b) = f(x as u32, y);
                *px = color::compose_rgb(r, g, b);
            }
        }
        Ok(Raster {
            inner: Arc::new(inner),
        })
    }

    /// Create a raster from an already packed pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `data.len() != width * height`.
    pub fn from_packed(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "pixel buffer holds {} pixels, expected {}",
                data.len(),
                expected
            )));
        }
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                data,
            }),
        })
    }

    /// Get the raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the packed pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the packed pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = y as usize * self.inner.width as usize;
        &self.inner.data[start..start + self.inner.width as usize]
    }

    /// Check whether this raster already fits inside `width x height`.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.inner.width <= width && self.inner.height <= height
    }

    /// Check if two rasters have the same width and height.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Pixel-exact equality of size and content.
    pub fn equals(&self, other: &Raster) -> bool {
        self.sizes_equal(other) && self.inner.data == other.inner.data
    }

    /// Try to get mutable access to the pixel data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: (*self.inner).clone(),
        }
    }

    /// Take mutable ownership, copying only when the data is shared.
    pub fn into_mut(self) -> RasterMut {
        self.try_into_mut().unwrap_or_else(|shared| shared.to_mut())
    }
}

/// Mutable raster
///
/// Allows modification of pixel data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Get the raster width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the raster height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the packed pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the packed pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Consume the raster, returning `(width, height, packed pixels)`.
    pub fn into_parts(self) -> (u32, u32, Vec<u32>) {
        (self.inner.width, self.inner.height, self.inner.data)
    }
}

impl From<RasterMut> for Raster {
    fn from(raster: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster.inner),
        }
    }
}
