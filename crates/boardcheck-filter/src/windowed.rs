//! 3×3 local-sum filtering of distance fields
//!
//! Sums each pixel's 3×3 neighborhood with zero padding and keeps the
//! pixels whose sum falls strictly between two bounds. On a chamfer
//! distance field this picks out bands at a chosen depth inside shapes.

use crate::{FilterError, FilterResult};
use boardcheck_core::{BACKGROUND, Channels, DistanceField, FOREGROUND, Raster};

/// 3×3 neighborhood sums of a distance field.
///
/// Neighbors outside the field contribute 0.
pub fn local_sum_3x3(field: &DistanceField) -> Vec<u64> {
    let (w, h) = field.dimensions();
    let (w, h) = (w as i64, h as i64);
    let data = field.data();
    let mut sums = vec![0u64; data.len()];
    for y in 0..h {
        for x in 0..w {
            let mut s = 0u64;
            for dy in -1..=1 {
                let yy = y + dy;
                if yy < 0 || yy >= h {
                    continue;
                }
                for dx in -1..=1 {
                    let xx = x + dx;
                    if xx < 0 || xx >= w {
                        continue;
                    }
                    s += data[(yy * w + xx) as usize] as u64;
                }
            }
            sums[(y * w + x) as usize] = s;
        }
    }
    sums
}

/// Binary mask of pixels whose 3×3 local sum lies strictly inside
/// `(min, max)`; with `invert` the selection is complemented.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless `min < max`.
pub fn local_sum_refilter(field: &DistanceField, min: u64, max: u64, invert: bool) -> FilterResult<Raster> {
    if min >= max {
        return Err(FilterError::InvalidParameters(format!(
            "refilter bounds must satisfy min < max, got {} and {}",
            min, max
        )));
    }

    let (w, h) = field.dimensions();
    let data = local_sum_3x3(field)
        .into_iter()
        .map(|s| {
            let inside = min < s && s < max;
            if inside != invert { FOREGROUND } else { BACKGROUND }
        })
        .collect();
    Ok(Raster::from_vec(w, h, Channels::Gray, data)?)
}
