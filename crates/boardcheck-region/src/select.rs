//! Selection of components by size

use crate::conncomp::ComponentLabeling;
use crate::error::{RegionError, RegionResult, check_mask};
use boardcheck_core::{BACKGROUND, Channels, FOREGROUND, Raster};

/// Keep the pixels whose component area lies strictly between `min_area`
/// and `max_area`.
///
/// Each output pixel is decided by looking up its label's area, so a
/// component is either kept whole or dropped whole. Background stays 0.
///
/// # Errors
///
/// Returns [`RegionError::LabelingMismatch`] if `labeling` was computed on
/// a raster of different dimensions than `mask`.
pub fn filter_by_area(
    mask: &Raster,
    labeling: &ComponentLabeling,
    min_area: u32,
    max_area: u32,
) -> RegionResult<Raster> {
    check_mask(mask)?;
    if labeling.dimensions() != mask.dimensions() {
        return Err(RegionError::LabelingMismatch {
            mask: mask.dimensions(),
            labels: labeling.dimensions(),
        });
    }

    let keep: Vec<bool> = std::iter::once(false)
        .chain(
            labeling
                .stats
                .iter()
                .map(|s| min_area < s.area && s.area < max_area),
        )
        .collect();

    let data = labeling
        .labels
        .data()
        .iter()
        .map(|&l| {
            if keep.get(l as usize).copied().unwrap_or(false) {
                FOREGROUND
            } else {
                BACKGROUND
            }
        })
        .collect();
    Ok(Raster::from_vec(mask.width(), mask.height(), Channels::Gray, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conncomp::{Connectivity, label_components};
    use boardcheck_core::{Color, Rect};

    fn squares() -> Raster {
        // 2x2 (area 4), 3x3 (area 9), 4x4 (area 16)
        let mut m = Raster::new(20, 6, Channels::Gray).unwrap();
        m.render_filled_rect_color(&Rect::new_unchecked(0, 0, 2, 2), Color::WHITE);
        m.render_filled_rect_color(&Rect::new_unchecked(5, 0, 3, 3), Color::WHITE);
        m.render_filled_rect_color(&Rect::new_unchecked(10, 0, 4, 4), Color::WHITE);
        m
    }

    #[test]
    fn test_strict_bounds() {
        let m = squares();
        let l = label_components(&m, Connectivity::EightWay).unwrap();
        let out = filter_by_area(&m, &l, 4, 16).unwrap();
        assert_eq!(out.count_foreground(), 9);
        assert_eq!(out.get_pixel(6, 1), Some(255));
        assert_eq!(out.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_idempotent() {
        let m = squares();
        let l = label_components(&m, Connectivity::EightWay).unwrap();
        let once = filter_by_area(&m, &l, 3, 10).unwrap();
        let l2 = label_components(&once, Connectivity::EightWay).unwrap();
        let twice = filter_by_area(&once, &l2, 3, 10).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_stale_labeling_rejected() {
        let m = squares();
        let l = label_components(&m, Connectivity::EightWay).unwrap();
        let other = Raster::new(10, 6, Channels::Gray).unwrap();
        assert!(matches!(
            filter_by_area(&other, &l, 0, 100),
            Err(RegionError::LabelingMismatch { .. })
        ));
    }
}
