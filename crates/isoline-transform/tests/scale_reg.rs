//! Bicubic rescale regression test
//!
//! Checks the edge-anchored coordinate mapping, color preservation on
//! uniform sources and channel saturation on hard edges.

use isoline_core::color;
use isoline_io::RasterFormat;
use isoline_test::{RegParams, fixtures};
use isoline_transform::{normalized_coord, resample_row, sample_bicubic, scale_to_size};

#[test]
fn scale_reg() {
    let mut rp = RegParams::new("scale");

    // uniform sources keep their color at any size
    let src = fixtures::uniform_raster(300, 200, (17, 130, 250)).unwrap();
    for &(w, h) in &[(64, 64), (7, 311), (1, 1)] {
        let out = scale_to_size(&src, w, h).unwrap();
        rp.compare_values(w as f64, out.width() as f64, 0.0);
        rp.compare_values(h as f64, out.height() as f64, 0.0);
        let expected = fixtures::uniform_raster(w, h, (17, 130, 250)).unwrap();
        rp.compare_raster(&expected, &out);
    }

    // the first and last output columns sample the source's edge columns
    let grad = fixtures::gradient_raster(256, 16).unwrap();
    let out = scale_to_size(&grad, 64, 4).unwrap();
    rp.compare_values(0.0, out.get_rgb(0, 0).unwrap().0 as f64, 0.0);
    rp.compare_values(255.0, out.get_rgb(63, 3).unwrap().0 as f64, 0.0);
    // and the ramp stays monotonic
    let mut monotonic = true;
    for x in 1..64 {
        if out.get_rgb(x, 1).unwrap().0 < out.get_rgb(x - 1, 1).unwrap().0 {
            monotonic = false;
        }
    }
    rp.compare_values(1.0, if monotonic { 1.0 } else { 0.0 }, 0.0);
    rp.write_raster(&out, RasterFormat::Png).unwrap();

    rp.compare_values(0.0, normalized_coord(0, 2048) as f64, 0.0);
    rp.compare_values(1.0, normalized_coord(2047, 2048) as f64, 0.0);

    // hard black/white edges overshoot and must clamp to the channel range
    let checker = fixtures::checker_raster(16, 16, 4).unwrap();
    for i in 0..=32 {
        let (r, g, b) = sample_bicubic(&checker, i as f32 / 32.0, 0.3);
        rp.compare_values(r as f64, g as f64, 0.0);
        rp.compare_values(r as f64, b as f64, 0.0);
    }

    // row-at-a-time resampling equals the whole-image resize
    let whole = scale_to_size(&checker, 40, 24).unwrap();
    let mut row = vec![0u32; 40];
    for y in 0..24 {
        resample_row(&checker, 40, 24, y, &mut row).unwrap();
        let same = row.as_slice() == whole.row_data(y);
        rp.compare_values(1.0, if same { 1.0 } else { 0.0 }, 0.0);
    }
    rp.compare_values(
        color::compose_rgb(0, 0, 0) as f64,
        whole.get_pixel(0, 0).unwrap() as f64,
        0.0,
    );

    assert!(rp.cleanup());
}
