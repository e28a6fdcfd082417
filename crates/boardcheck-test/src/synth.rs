//! Synthetic rasters for tests
//!
//! Board-like scenes built in code: a uniform board, disks standing in
//! for drilled holes, rectangles for pads and traces.

use crate::TestResult;
use boardcheck_core::{Channels, Color, Raster, Rect};

/// A uniform RGB board.
pub fn board(width: u32, height: u32, color: Color) -> TestResult<Raster> {
    let mut raster = Raster::new(width, height, Channels::Rgb)?;
    raster.render_filled_rect_color(
        &Rect::new_unchecked(0, 0, width as i32, height as i32),
        color,
    );
    Ok(raster)
}

/// A binary mask with the given disks (center x, center y, radius) set
/// to foreground.
pub fn disk_mask(width: u32, height: u32, disks: &[(i32, i32, u32)]) -> TestResult<Raster> {
    let mut raster = Raster::new(width, height, Channels::Gray)?;
    for &(cx, cy, r) in disks {
        raster.render_filled_circle_color(cx, cy, r, Color::WHITE);
    }
    Ok(raster)
}

/// A binary mask with the given rectangles set to foreground.
pub fn rect_mask(width: u32, height: u32, rects: &[Rect]) -> TestResult<Raster> {
    let mut raster = Raster::new(width, height, Channels::Gray)?;
    for rect in rects {
        raster.render_filled_rect_color(rect, Color::WHITE);
    }
    Ok(raster)
}

/// Paint disks of `color` onto an existing raster.
pub fn paint_disks(raster: &mut Raster, disks: &[(i32, i32, u32)], color: Color) {
    for &(cx, cy, r) in disks {
        raster.render_filled_circle_color(cx, cy, r, color);
    }
}

/// Paint rectangles of `color` onto an existing raster.
pub fn paint_rects(raster: &mut Raster, rects: &[Rect], color: Color) {
    for rect in rects {
        raster.render_filled_rect_color(rect, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_mask_area() {
        let m = disk_mask(40, 40, &[(20, 20, 10)]).unwrap();
        assert_eq!(m.count_foreground(), 317);
        assert!(m.is_binary());
    }

    #[test]
    fn test_board_color() {
        let b = board(8, 8, Color::new(10, 90, 20)).unwrap();
        assert_eq!(b.get_rgb(7, 7), Some((10, 90, 20)));
    }
}
