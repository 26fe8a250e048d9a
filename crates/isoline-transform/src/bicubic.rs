//! Bicubic sampling
//!
//! Catmull-Rom cubic Hermite interpolation over a 4x4 neighborhood. The
//! neighborhood is centered on `(u * w - 0.5, v * h - 0.5)` so that texel
//! centers sit at half-integer positions; reads past the edge are clamped.

use isoline_core::Raster;

/// Cubic Hermite spline through `b` and `c`, with `a` and `d` as the outer
/// control points, evaluated at `t` in `[0, 1)`.
#[inline]
pub fn cubic_hermite(a: f32, b: f32, c: f32, d: f32, t: f32) -> f32 {
    let k3 = -a / 2.0 + (3.0 * b) / 2.0 - (3.0 * c) / 2.0 + d / 2.0;
    let k2 = a - (5.0 * b) / 2.0 + 2.0 * c - d / 2.0;
    let k1 = -a / 2.0 + c / 2.0;
    let k0 = b;

    k3 * t * t * t + k2 * t * t + k1 * t + k0
}

/// Sample `src` at normalized coordinates `u` (horizontal) and `v`
/// (vertical), both in `[0, 1]`.
///
/// Deterministic and side-effect free; identical inputs always produce the
/// identical triple.
pub fn sample_bicubic(src: &Raster, u: f32, v: f32) -> (u8, u8, u8) {
    let x = u * src.width() as f32 - 0.5;
    let xint = x as i64;
    let xfract = x - x.floor();

    let y = v * src.height() as f32 - 0.5;
    let yint = y as i64;
    let yfract = y - y.floor();

    // p[row][col], rows yint-1..=yint+2, cols xint-1..=xint+2
    let mut p = [[(0u8, 0u8, 0u8); 4]; 4];
    for (dy, row) in p.iter_mut().enumerate() {
        for (dx, px) in row.iter_mut().enumerate() {
            *px = src.get_rgb_clamped(xint + dx as i64 - 1, yint + dy as i64 - 1);
        }
    }

    let channel = |pick: fn((u8, u8, u8)) -> u8| -> u8 {
        let mut cols = [0f32; 4];
        for (k, row) in p.iter().enumerate() {
            cols[k] = cubic_hermite(
                pick(row[0]) as f32,
                pick(row[1]) as f32,
                pick(row[2]) as f32,
                pick(row[3]) as f32,
                xfract,
            );
        }
        let value = cubic_hermite(cols[0], cols[1], cols[2], cols[3], yfract);
        value.clamp(0.0, 255.0) as u8
    };

    (channel(|c| c.0), channel(|c| c.1), channel(|c| c.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hermite_endpoints() {
        assert_eq!(cubic_hermite(1.0, 2.0, 3.0, 4.0, 0.0), 2.0);
        assert!((cubic_hermite(1.0, 2.0, 3.0, 4.0, 1.0) - 3.0).abs() < 1e-5);
        // linear data stays linear
        assert!((cubic_hermite(1.0, 2.0, 3.0, 4.0, 0.5) - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_hermite_overshoot_is_possible() {
        // a step edge overshoots, which is why channels are clamped
        let v = cubic_hermite(0.0, 0.0, 255.0, 255.0, 0.9);
        assert!(v > 0.0);
        let over = cubic_hermite(0.0, 255.0, 255.0, 0.0, 0.5);
        assert!(over > 255.0);
    }

    #[test]
    fn test_uniform_source_is_preserved() {
        let src = Raster::from_rgb_fn(9, 7, |_, _| (210, 220, 230)).unwrap();
        for &(u, v) in &[(0.0, 0.0), (0.3, 0.7), (1.0, 1.0), (0.5, 0.0)] {
            assert_eq!(sample_bicubic(&src, u, v), (210, 220, 230));
        }
    }

    #[test]
    fn test_overshoot_saturates() {
        // step edge between x=3 and x=4; sampling at x=4.5 overshoots to ~271
        let src = Raster::from_rgb_fn(8, 8, |x, _| if x < 4 { (0, 0, 0) } else { (255, 255, 255) })
            .unwrap();
        assert_eq!(sample_bicubic(&src, 0.625, 0.5), (255, 255, 255));
        // mirrored edge undershoots below zero
        let src = Raster::from_rgb_fn(8, 8, |x, _| if x < 4 { (255, 255, 255) } else { (0, 0, 0) })
            .unwrap();
        assert_eq!(sample_bicubic(&src, 0.625, 0.5), (0, 0, 0));
    }

    #[test]
    fn test_deterministic() {
        let src = Raster::from_rgb_fn(31, 17, |x, y| ((x * 7) as u8, (y * 13) as u8, (x ^ y) as u8))
            .unwrap();
        let a = sample_bicubic(&src, 0.37, 0.81);
        let b = sample_bicubic(&src, 0.37, 0.81);
        assert_eq!(a, b);
    }
}
