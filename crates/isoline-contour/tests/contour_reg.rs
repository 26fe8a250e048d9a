//! Contour pipeline regression test
//!
//! Stamps with color-coded stencils so each output tile can be decoded back
//! into the configuration code that produced it, and compares against the
//! single-threaded `fixtures::reference_contour`.

use isoline_contour::{ContourError, IsolineOptions, StencilSet, contour_raster};
use isoline_core::Raster;
use isoline_io::RasterFormat;
use isoline_test::{RegParams, fixtures};

const STEP: u32 = 8;
const THRESHOLD: u8 = 200;

fn coded_set() -> StencilSet {
    StencilSet::new(fixtures::coded_stencils(STEP).unwrap()).unwrap()
}

/// Dark disc on a white background.
fn disc_raster(width: u32, height: u32, radius: u32) -> Raster {
    let (cx, cy) = (width as i64 / 2, height as i64 / 2);
    let r2 = radius as i64 * radius as i64;
    Raster::from_rgb_fn(width, height, |x, y| {
        let (dx, dy) = (x as i64 - cx, y as i64 - cy);
        if dx * dx + dy * dy <= r2 {
            (20, 40, 60)
        } else {
            (250, 250, 250)
        }
    })
    .unwrap()
}

fn reference_contour(working: &Raster) -> Raster {
    fixtures::reference_contour(working, &fixtures::coded_stencils(STEP).unwrap(), STEP, THRESHOLD)
        .unwrap()
}

#[test]
fn contour_reg() {
    let mut rp = RegParams::new("contour");
    let stencils = coded_set();
    let opts = IsolineOptions::default();

    // 1000x1000 fits the working size: no rescale, output keeps its size
    let src = disc_raster(1000, 1000, 300);
    let expected = reference_contour(&src);
    let out = contour_raster(src.clone(), &stencils, &opts, 4).unwrap();
    rp.compare_values(1000.0, out.width() as f64, 0.0);
    rp.compare_values(1000.0, out.height() as f64, 0.0);
    rp.compare_raster(&expected, &out);
    rp.write_raster(&out, RasterFormat::Png).unwrap();

    // the disc interior is code 15, the far background code 0
    let center = fixtures::decode_code(out.get_rgb(500, 500).unwrap());
    rp.compare_values(15.0, center.map_or(-1.0, |c| c as f64), 0.0);
    let corner = fixtures::decode_code(out.get_rgb(3, 3).unwrap());
    rp.compare_values(0.0, corner.map_or(-1.0, |c| c as f64), 0.0);

    // a non-multiple size leaves the uncovered right and bottom strips as
    // they were
    let src = disc_raster(203, 77, 30);
    let expected = reference_contour(&src);
    let out = contour_raster(src.clone(), &stencils, &opts, 3).unwrap();
    rp.compare_raster(&expected, &out);
    rp.compare_values(
        src.get_pixel(202, 76).unwrap() as f64,
        out.get_pixel(202, 76).unwrap() as f64,
        0.0,
    );

    assert!(rp.cleanup());
}

#[test]
fn contour_dark_reg() {
    let mut rp = RegParams::new("contour_dark");

    // everything dark except the grid corner, which is always bright
    let src = fixtures::uniform_raster(64, 64, (0, 0, 0)).unwrap();
    let out = contour_raster(src, &coded_set(), &IsolineOptions::default(), 2).unwrap();
    for i in 0..8u32 {
        for j in 0..8u32 {
            let code = fixtures::decode_code(out.get_rgb(j * STEP, i * STEP).unwrap());
            let expected = if i == 7 && j == 7 { 13.0 } else { 15.0 };
            rp.compare_values(expected, code.map_or(-1.0, |c| c as f64), 0.0);
        }
    }

    assert!(rp.cleanup());
}

#[test]
fn contour_rescale_reg() {
    let mut rp = RegParams::new("contour_rescale");

    // 4096x4096 uniformly bright: 2048x2048 output, all code-0 tiles
    let src = fixtures::uniform_raster(4096, 4096, (255, 255, 255)).unwrap();
    let out = contour_raster(src, &coded_set(), &IsolineOptions::default(), 8).unwrap();
    rp.compare_values(2048.0, out.width() as f64, 0.0);
    rp.compare_values(2048.0, out.height() as f64, 0.0);
    let expected = fixtures::uniform_raster(2048, 2048, fixtures::code_color(0)).unwrap();
    rp.compare_raster(&expected, &out);

    // a downscaled source matches the reference run on the rescaled raster
    let opts = IsolineOptions::default().with_rescale(256, 192);
    let src = disc_raster(600, 500, 180);
    let working = isoline_transform::scale_to_size(&src, 256, 192).unwrap();
    let expected = reference_contour(&working);
    let out = contour_raster(src, &coded_set(), &opts, 5).unwrap();
    rp.compare_raster(&expected, &out);

    assert!(rp.cleanup());
}

#[test]
fn contour_determinism_reg() {
    let mut rp = RegParams::new("contour_determinism");
    let stencils = coded_set();

    let cases = [
        (disc_raster(333, 250, 90), IsolineOptions::default()),
        (
            fixtures::checker_raster(700, 650, 37).unwrap(),
            IsolineOptions::default().with_rescale(320, 256),
        ),
    ];
    for (src, opts) in cases {
        let single = contour_raster(src.clone(), &stencils, &opts, 1).unwrap();
        for tasks in [2, 3, 8, 64] {
            let out = contour_raster(src.clone(), &stencils, &opts, tasks).unwrap();
            rp.compare_bytes(&pixel_bytes(&single), &pixel_bytes(&out));
        }
    }

    assert!(rp.cleanup());
}

#[test]
fn contour_errors_reg() {
    let mut rp = RegParams::new("contour_errors");
    let src = fixtures::uniform_raster(32, 32, (0, 0, 0)).unwrap();

    let r = contour_raster(src.clone(), &coded_set(), &IsolineOptions::default(), 0);
    rp.compare_values(1.0, f64::from(matches!(r, Err(ContourError::InvalidTaskCount(0)))), 0.0);

    let mut wrong = fixtures::coded_stencils(STEP).unwrap();
    wrong[9] = fixtures::uniform_raster(STEP, STEP + 1, (1, 2, 3)).unwrap();
    let r = StencilSet::new(wrong);
    rp.compare_values(
        1.0,
        f64::from(matches!(r, Err(ContourError::StencilSize { index: 9, .. }))),
        0.0,
    );

    let r = StencilSet::new(fixtures::coded_stencils(STEP).unwrap()[..15].to_vec());
    rp.compare_values(1.0, f64::from(matches!(r, Err(ContourError::StencilCount(15)))), 0.0);

    assert!(rp.cleanup());
}

fn pixel_bytes(raster: &Raster) -> Vec<u8> {
    raster.data().iter().flat_map(|p| p.to_be_bytes()).collect()
}
