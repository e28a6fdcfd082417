//! Recipe regression test
//!
//! Runs every recipe end to end on synthetic boards.
//!
//! Run with:
//! ```
//! cargo test -p boardcheck-pipeline --test recipes_reg
//! ```
//!
//! Generate golden files:
//! ```
//! REGTEST_MODE=generate cargo test -p boardcheck-pipeline --test recipes_reg
//! ```

use boardcheck_color::ThresholdKind;
use boardcheck_core::{Circle, Color, Rect};
use boardcheck_io::ImageFormat;
use boardcheck_pipeline::{PipelineParameters, Recipe, difference, missing_hole, mouse_bite};
use boardcheck_test::{RegParams, synth};

const COPPER: Color = Color::new(20, 90, 20);
const SUBSTRATE: Color = Color::new(0, 120, 0);

#[test]
fn missing_hole_reg() {
    let mut rp = RegParams::new("missing_hole");

    // Bright disk on black, holes selected by plain thresholding
    let mut scene = synth::board(100, 100, Color::BLACK).unwrap();
    synth::paint_disks(&mut scene, &[(50, 50, 10)], Color::WHITE);
    let mut params = PipelineParameters::default();
    params.missing_hole.hole_kind = ThresholdKind::Binary;
    params.missing_hole.min_area = 200;
    params.missing_hole.max_area = 600;

    let det = missing_hole(&scene, &params).unwrap();
    eprintln!("bright disk: {:?}", det.circles);
    rp.compare_values(1.0, det.circles.len() as f64, 0.0); // 1
    rp.compare_circles(&[Circle::new(50.0, 50.0, 10.0)], &det.circles, 2.0); // 2
    rp.write_raster_and_check(&det.annotated, ImageFormat::Png).unwrap(); // 3

    // Dark hole on a bright board with default polarity; the frame left
    // by the closing is too large to pass the area filter
    let mut board = synth::board(100, 100, Color::new(200, 200, 200)).unwrap();
    synth::paint_disks(&mut board, &[(50, 50, 10)], Color::new(20, 20, 20));
    let det = missing_hole(&board, &PipelineParameters::default()).unwrap();
    eprintln!("dark hole: {:?}", det.circles);
    rp.compare_values(1.0, det.circles.len() as f64, 0.0); // 4
    rp.compare_circles(&[Circle::new(50.0, 50.0, 10.0)], &det.circles, 2.0); // 5

    // A hole outside the area bounds is not reported
    let mut big = synth::board(100, 100, Color::new(200, 200, 200)).unwrap();
    synth::paint_disks(&mut big, &[(50, 50, 18)], Color::new(20, 20, 20));
    let det = missing_hole(&big, &PipelineParameters::default()).unwrap();
    rp.compare_values(0.0, det.circles.len() as f64, 0.0); // 6

    assert!(rp.cleanup(), "missing_hole regression test failed");
}

#[test]
fn determinism_reg() {
    let mut rp = RegParams::new("determinism");

    let mut scene = synth::board(120, 90, Color::new(200, 200, 200)).unwrap();
    synth::paint_disks(&mut scene, &[(30, 40, 10), (85, 50, 9)], Color::new(10, 10, 10));
    let params = PipelineParameters::default();

    for recipe in Recipe::ALL {
        let a = recipe.run(&scene, &params).unwrap();
        let b = recipe.run(&scene, &params).unwrap();
        rp.compare_rasters(&a.annotated, &b.annotated);
        rp.compare_circles(&a.circles, &b.circles, 0.0);
    }

    assert!(rp.cleanup(), "determinism regression test failed");
}

#[test]
fn mouse_bite_reg() {
    let mut rp = RegParams::new("mouse_bite");

    let params = PipelineParameters::default();
    let radius = params.mouse_bite.highlight_radius;
    let trace = Rect::new_unchecked(10, 20, 100, 40);

    // A row of perforations just inside the upper edge of the trace
    let bites = [(45, 29, 5), (60, 29, 5), (75, 29, 5)];
    let mut board = synth::board(120, 80, SUBSTRATE).unwrap();
    synth::paint_rects(&mut board, &[trace], COPPER);
    synth::paint_disks(&mut board, &bites, SUBSTRATE);

    let det = mouse_bite(&board, &params).unwrap();
    eprintln!("mouse bite: {:?}", det.circles);
    rp.compare_values(3.0, det.circles.len() as f64, 0.0); // 1
    let near = |c: &Circle, &(x, y, _): &(i32, i32, u32)| {
        let (dx, dy) = (c.cx - x as f64, c.cy - y as f64);
        (dx * dx + dy * dy).sqrt() <= radius
    };
    let placed = !det.circles.is_empty()
        && det.circles.iter().all(|c| c.radius == radius && bites.iter().any(|b| near(c, b)));
    rp.compare_values(1.0, placed as u8 as f64, 0.0); // 2
    let covered = bites.iter().all(|b| det.circles.iter().any(|c| near(c, b)));
    rp.compare_values(1.0, covered as u8 as f64, 0.0); // 3
    rp.compare_values(3.0, det.annotated.channels().count() as f64, 0.0); // 4
    let color = params.draw.color;
    let mut stroked = 0;
    for y in 0..det.annotated.height() {
        for x in 0..det.annotated.width() {
            if det.annotated.get_rgb(x, y) == Some((color.r, color.g, color.b)) {
                stroked += 1;
            }
        }
    }
    rp.compare_values(1.0, (stroked > 0) as u8 as f64, 0.0); // 5

    // The same trace with clean edges
    let mut clean = synth::board(120, 80, SUBSTRATE).unwrap();
    synth::paint_rects(&mut clean, &[trace], COPPER);
    let det = mouse_bite(&clean, &params).unwrap();
    rp.compare_values(0.0, det.circles.len() as f64, 0.0); // 6
    rp.compare_rasters(&clean, &det.annotated); // 7

    // No copper, no detections
    let bare = synth::board(120, 80, SUBSTRATE).unwrap();
    let det = mouse_bite(&bare, &params).unwrap();
    rp.compare_values(0.0, det.circles.len() as f64, 0.0); // 8
    rp.compare_rasters(&bare, &det.annotated); // 9

    assert!(rp.cleanup(), "mouse_bite regression test failed");
}

#[test]
fn difference_reg() {
    let mut rp = RegParams::new("difference");

    let reference = synth::board(80, 60, SUBSTRATE).unwrap();
    let mut inspected = reference.clone();
    synth::paint_rects(&mut inspected, &[Rect::new_unchecked(20, 30, 10, 6)], Color::BLACK);

    let det = difference(&inspected, &reference, &PipelineParameters::default()).unwrap();
    rp.compare_circles(&[Circle::new(25.0, 33.0, 5.0)], &det.circles, 0.0); // 1
    // The circle is drawn in green on the inspected board
    rp.compare_values(1.0, (det.annotated.get_rgb(30, 33) == Some((0, 255, 0))) as u8 as f64, 0.0); // 2

    let same = difference(&reference, &reference, &PipelineParameters::default()).unwrap();
    rp.compare_values(0.0, same.circles.len() as f64, 0.0); // 3
    rp.compare_rasters(&reference, &same.annotated); // 4

    assert!(rp.cleanup(), "difference regression test failed");
}

#[test]
fn params_file_reg() {
    let mut rp = RegParams::new("params_file");

    let path = std::env::temp_dir().join("boardcheck_params_file_reg.json");
    std::fs::write(&path, r#"{ "missing_hole": { "fill_threshold": 0.6 }, "draw": { "thickness": 3 } }"#)
        .unwrap();
    let params = PipelineParameters::from_json_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    rp.compare_values(0.6, params.missing_hole.fill_threshold, 1e-12); // 1
    rp.compare_values(3.0, params.draw.thickness as f64, 0.0); // 2
    rp.compare_values(600.0, params.missing_hole.max_area as f64, 0.0); // 3

    assert!(rp.cleanup(), "params_file regression test failed");
}
