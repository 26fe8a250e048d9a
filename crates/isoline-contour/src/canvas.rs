//! Shared working raster
//!
//! During a run every task writes its own rows of the working raster and,
//! after a barrier, reads rows written by others. The canvas keeps the
//! packed pixels in one buffer of `AtomicU32` so that this sharing needs no
//! locks: within a phase writes go to disjoint rows, and the barrier between
//! phases orders them before any read. Relaxed ordering is enough because
//! the barrier's mutex provides the happens-before edge.

use isoline_core::{Raster, RasterMut, color};
use std::sync::atomic::{AtomicU32, Ordering};

/// Working raster shared by all tasks of a run.
#[derive(Debug)]
pub struct SharedCanvas {
    width: u32,
    height: u32,
    pixels: Vec<AtomicU32>,
}

impl SharedCanvas {
    /// Allocate a black `width x height` canvas.
    pub fn new(width: u32, height: u32) -> isoline_core::Result<Self> {
        Ok(Self::from_raster_mut(Raster::new(width, height)?.into_mut()))
    }

    /// Take over a raster's pixel buffer without copying pixels.
    pub fn from_raster_mut(raster: RasterMut) -> Self {
        let (width, height, data) = raster.into_parts();
        Self {
            width,
            height,
            // same size and alignment, so the allocation is reused in place
            pixels: data.into_iter().map(AtomicU32::new).collect(),
        }
    }

    /// Canvas width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Packed pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)].load(Ordering::Relaxed)
    }

    /// Brightness `(r + g + b) / 3` of the pixel at (x, y).
    #[inline]
    pub fn brightness(&self, x: u32, y: u32) -> u8 {
        color::pixel_brightness(self.pixel(x, y))
    }

    /// Store a run of packed pixels starting at (x, y) along row `y`.
    pub fn store_span(&self, x: u32, y: u32, span: &[u32]) {
        let start = self.index(x, y);
        for (dst, &px) in self.pixels[start..start + span.len()].iter().zip(span) {
            dst.store(px, Ordering::Relaxed);
        }
    }

    /// Copy `tile` with its top-left corner at (x, y).
    ///
    /// The tile must fit inside the canvas.
    pub fn blit(&self, tile: &Raster, x: u32, y: u32) {
        debug_assert!(x + tile.width() <= self.width && y + tile.height() <= self.height);
        for ty in 0..tile.height() {
            self.store_span(x, y + ty, tile.row_data(ty));
        }
    }

    /// Finish the run and hand back an ordinary raster.
    pub fn into_raster(self) -> isoline_core::Result<Raster> {
        let data = self.pixels.into_iter().map(AtomicU32::into_inner).collect();
        Raster::from_packed(self.width, self.height, data)
    }
}
