//! Morphology regression test
//!
//! Closing stability, duality of opening and closing, and the anchor of
//! even-sized elements.
//!
//! Run with:
//! ```
//! cargo test -p boardcheck-morph --test morph_reg
//! ```

use boardcheck_core::{Color, Rect};
use boardcheck_morph::{BorderMode, MorphOp, Sel, close, dilate, erode, morph, open};
use boardcheck_test::{RegParams, synth};

#[test]
fn close_reg() {
    let mut rp = RegParams::new("close");
    let border = BorderMode::Constant(0);

    // Shapes well inside the raster with gaps narrower than the element
    let mut mask = synth::disk_mask(120, 100, &[(40, 50, 14), (80, 50, 10)]).unwrap();
    synth::paint_rects(&mut mask, &[Rect::new_unchecked(30, 10, 60, 6)], Color::WHITE);
    mask.render_filled_rect_color(&Rect::new_unchecked(58, 10, 2, 6), Color::BLACK);

    for sel in [Sel::ellipse(8, 8).unwrap(), Sel::rect(5, 5).unwrap(), Sel::ellipse(5, 3).unwrap()] {
        let once = close(&mask, &sel, border).unwrap();
        let twice = close(&once, &sel, border).unwrap();
        rp.compare_rasters(&once, &twice);
        // Closing only adds pixels here
        let extensive = mask
            .data()
            .iter()
            .zip(once.data())
            .all(|(&a, &b)| b >= a);
        rp.compare_values(1.0, extensive as u8 as f64, 0.0);
    }

    // The 2-pixel gap in the bar is bridged by a 5x5 closing
    let closed = close(&mask, &Sel::rect(5, 5).unwrap(), border).unwrap();
    rp.compare_values(255.0, closed.get_pixel(58, 12).unwrap() as f64, 0.0);

    assert!(rp.cleanup(), "close regression test failed");
}

#[test]
fn open_reg() {
    let mut rp = RegParams::new("open");
    let border = BorderMode::Constant(0);
    let sel = Sel::rect(5, 5).unwrap();

    // Opening removes specks smaller than the element and keeps blocks
    let mut mask = synth::rect_mask(60, 40, &[Rect::new_unchecked(10, 10, 20, 15)]).unwrap();
    synth::paint_rects(&mut mask, &[Rect::new_unchecked(45, 5, 3, 3)], Color::WHITE);
    let opened = open(&mask, &sel, border).unwrap();
    let expected = synth::rect_mask(60, 40, &[Rect::new_unchecked(10, 10, 20, 15)]).unwrap();
    rp.compare_rasters(&expected, &opened); // 1
    rp.compare_rasters(&opened, &morph(&mask, MorphOp::Open, &sel, border).unwrap()); // 2

    // Dilation then erosion by a rect restores a rect block
    let grown = dilate(&expected, &sel, border).unwrap();
    rp.compare_values((24 * 19) as f64, grown.count_foreground() as f64, 0.0); // 3
    rp.compare_rasters(&expected, &erode(&grown, &sel, border).unwrap()); // 4

    assert!(rp.cleanup(), "open regression test failed");
}

#[test]
fn anchor_reg() {
    let mut rp = RegParams::new("anchor");

    // A 4x4 element has its anchor at (1, 1): a point spreads one pixel
    // up and left, two pixels down and right
    let point = synth::rect_mask(12, 12, &[Rect::new_unchecked(5, 5, 1, 1)]).unwrap();
    let sel = Sel::rect(4, 4).unwrap();
    rp.compare_values(1.0, sel.origin_x() as f64, 0.0); // 1
    let grown = dilate(&point, &sel, BorderMode::Constant(0)).unwrap();
    let expected = synth::rect_mask(12, 12, &[Rect::new_unchecked(4, 4, 4, 4)]).unwrap();
    rp.compare_rasters(&expected, &grown); // 2

    // Replicate border does not erode from the raster edge
    let full = synth::rect_mask(12, 12, &[Rect::new_unchecked(0, 0, 12, 12)]).unwrap();
    let kept = erode(&full, &sel, BorderMode::Replicate).unwrap();
    rp.compare_rasters(&full, &kept); // 3
    let eroded = erode(&full, &sel, BorderMode::Constant(0)).unwrap();
    rp.compare_values((9 * 9) as f64, eroded.count_foreground() as f64, 0.0); // 4

    assert!(rp.cleanup(), "anchor regression test failed");
}
