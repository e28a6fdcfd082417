//! Hole filling and distance transforms
//!
//! Hole filling floods the background from the raster border; anything the
//! flood cannot reach is enclosed and becomes foreground. The distance
//! transform is the classic two-pass chamfer scan with a 3×3 mask.

use crate::error::{RegionResult, check_mask};
use boardcheck_core::{BACKGROUND, DistanceField, FOREGROUND, Raster};
use std::collections::VecDeque;

/// Metric used by [`distance_transform`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DistanceMetric {
    /// City-block distance (orthogonal step 1, diagonal step 2)
    #[default]
    L1,
    /// Chessboard distance (every step 1)
    Chessboard,
}

impl DistanceMetric {
    /// Orthogonal and diagonal chamfer weights.
    fn weights(self) -> (u32, u32) {
        match self {
            DistanceMetric::L1 => (1, 2),
            DistanceMetric::Chessboard => (1, 1),
        }
    }
}

/// How the area outside the raster is treated by [`distance_transform`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Boundary {
    /// Outside is foreground: distances are measured to background inside
    /// the raster only
    #[default]
    Foreground,
    /// Outside is background: distances are bounded by the raster edge
    Background,
}

/// Fill enclosed holes in a binary mask.
///
/// Background pixels not 4-connected to the raster border become
/// foreground. The result holds only 0 and 255.
pub fn fill_holes(mask: &Raster) -> RegionResult<Raster> {
    check_mask(mask)?;

    let w = mask.width() as usize;
    let h = mask.height() as usize;
    let src = mask.data();
    let mut outside = vec![false; w * h];
    let mut queue = VecDeque::new();

    let seed = |x: usize, y: usize, outside: &mut Vec<bool>, queue: &mut VecDeque<usize>| {
        let i = y * w + x;
        if src[i] == 0 && !outside[i] {
            outside[i] = true;
            queue.push_back(i);
        }
    };
    for x in 0..w {
        seed(x, 0, &mut outside, &mut queue);
        seed(x, h - 1, &mut outside, &mut queue);
    }
    for y in 0..h {
        seed(0, y, &mut outside, &mut queue);
        seed(w - 1, y, &mut outside, &mut queue);
    }

    while let Some(i) = queue.pop_front() {
        let x = i % w;
        let y = i / w;
        let mut visit = |j: usize| {
            if src[j] == 0 && !outside[j] {
                outside[j] = true;
                queue.push_back(j);
            }
        };
        if x > 0 {
            visit(i - 1);
        }
        if x + 1 < w {
            visit(i + 1);
        }
        if y > 0 {
            visit(i - w);
        }
        if y + 1 < h {
            visit(i + w);
        }
    }

    let mut out = mask.create_template();
    for (o, &reached) in out.data_mut().iter_mut().zip(&outside) {
        *o = if reached { BACKGROUND } else { FOREGROUND };
    }
    Ok(out)
}

/// Chamfer distance from each foreground pixel to the nearest background
/// pixel.
///
/// Background pixels are 0. When no background is reachable (an
/// all-foreground mask with [`Boundary::Foreground`]) every pixel holds
/// [`DistanceField::UNREACHED`].
///
/// # Arguments
///
/// * `mask` - 1-channel mask; non-zero samples are foreground
/// * `metric` - L1 or chessboard
/// * `boundary` - treatment of the area outside the raster
pub fn distance_transform(mask: &Raster, metric: DistanceMetric, boundary: Boundary) -> RegionResult<DistanceField> {
    check_mask(mask)?;

    let w = mask.width() as i64;
    let h = mask.height() as i64;
    let (ortho, diag) = metric.weights();
    let outside = match boundary {
        Boundary::Foreground => DistanceField::UNREACHED,
        Boundary::Background => 0,
    };

    let init = mask
        .data()
        .iter()
        .map(|&v| if v == 0 { 0 } else { DistanceField::UNREACHED })
        .collect();
    let mut field = DistanceField::from_vec(w as u32, h as u32, init)?;
    let d = field.data_mut();

    let at = |d: &[u32], x: i64, y: i64| -> u32 {
        if x < 0 || y < 0 || x >= w || y >= h {
            outside
        } else {
            d[(y * w + x) as usize]
        }
    };

    let forward = [(-1, 0, ortho), (-1, -1, diag), (0, -1, ortho), (1, -1, diag)];
    for y in 0..h {
        for x in 0..w {
            let i = (y * w + x) as usize;
            if d[i] == 0 {
                continue;
            }
            let mut best = d[i];
            for &(dx, dy, wt) in &forward {
                best = best.min(at(d, x + dx, y + dy).saturating_add(wt));
            }
            d[i] = best.min(DistanceField::UNREACHED);
        }
    }

    let backward = [(1, 0, ortho), (1, 1, diag), (0, 1, ortho), (-1, 1, diag)];
    for y in (0..h).rev() {
        for x in (0..w).rev() {
            let i = (y * w + x) as usize;
            if d[i] == 0 {
                continue;
            }
            let mut best = d[i];
            for &(dx, dy, wt) in &backward {
                best = best.min(at(d, x + dx, y + dy).saturating_add(wt));
            }
            d[i] = best.min(DistanceField::UNREACHED);
        }
    }

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardcheck_core::{Channels, Color, Rect};

    #[test]
    fn test_fill_ring() {
        let mut m = Raster::new(9, 9, Channels::Gray).unwrap();
        m.render_filled_rect_color(&Rect::new_unchecked(2, 2, 5, 5), Color::WHITE);
        m.set_pixel(4, 4, 0).unwrap();
        let out = fill_holes(&m).unwrap();
        assert_eq!(out.get_pixel(4, 4), Some(255));
        assert_eq!(out.count_foreground(), 25);
    }

    #[test]
    fn test_fill_leaves_open_notch() {
        let mut m = Raster::new(5, 5, Channels::Gray).unwrap();
        m.render_filled_rect_color(&Rect::new_unchecked(1, 1, 3, 3), Color::WHITE);
        m.set_pixel(2, 1, 0).unwrap();
        m.set_pixel(2, 2, 0).unwrap();
        let out = fill_holes(&m).unwrap();
        // The notch opens upward to the border row through (2, 1) and (2, 0).
        assert_eq!(out.get_pixel(2, 2), Some(0));
    }

    #[test]
    fn test_l1_single_background_pixel() {
        let mut m = Raster::new_filled(5, 5, Channels::Gray, 255).unwrap();
        m.set_pixel(2, 2, 0).unwrap();
        let f = distance_transform(&m, DistanceMetric::L1, Boundary::Foreground).unwrap();
        assert_eq!(f.get(2, 2), Some(0));
        assert_eq!(f.get(3, 2), Some(1));
        assert_eq!(f.get(3, 3), Some(2));
        assert_eq!(f.get(0, 0), Some(4));
        assert_eq!(f.get(4, 0), Some(4));
    }

    #[test]
    fn test_chessboard_single_background_pixel() {
        let mut m = Raster::new_filled(5, 5, Channels::Gray, 255).unwrap();
        m.set_pixel(2, 2, 0).unwrap();
        let f = distance_transform(&m, DistanceMetric::Chessboard, Boundary::Foreground).unwrap();
        assert_eq!(f.get(0, 0), Some(2));
        assert_eq!(f.get(4, 3), Some(2));
        assert_eq!(f.get(3, 3), Some(1));
    }

    #[test]
    fn test_boundary_modes() {
        let m = Raster::new_filled(5, 5, Channels::Gray, 255).unwrap();
        let fg = distance_transform(&m, DistanceMetric::L1, Boundary::Foreground).unwrap();
        assert!(fg.data().iter().all(|&v| v == DistanceField::UNREACHED));
        let bg = distance_transform(&m, DistanceMetric::L1, Boundary::Background).unwrap();
        assert_eq!(bg.get(0, 0), Some(1));
        assert_eq!(bg.get(2, 2), Some(3));
    }

    #[test]
    fn test_background_is_zero() {
        let m = Raster::new(3, 3, Channels::Gray).unwrap();
        let f = distance_transform(&m, DistanceMetric::L1, Boundary::Foreground).unwrap();
        assert!(f.data().iter().all(|&v| v == 0));
    }
}
