//! Color-range segmentation
//!
//! A pixel is selected when every channel lies within inclusive per-channel
//! bounds. Used to isolate copper-colored or substrate-colored regions.

use crate::{ColorError, ColorResult};
use boardcheck_core::{BACKGROUND, Channels, Color, FOREGROUND, Raster};

/// Select pixels whose channels all lie within `[lower, upper]`.
///
/// On a 1-channel raster only the `r` fields of the bounds are used.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] if a lower bound exceeds its
/// upper bound.
pub fn in_range(raster: &Raster, lower: Color, upper: Color) -> ColorResult<Raster> {
    let lo = [lower.r, lower.g, lower.b];
    let hi = [upper.r, upper.g, upper.b];
    if lo.iter().zip(&hi).any(|(l, h)| l > h) {
        return Err(ColorError::InvalidParameters(format!(
            "in_range lower bound {:?} exceeds upper bound {:?}",
            lower, upper
        )));
    }

    let n = raster.channels().count();
    let data = raster
        .data()
        .chunks_exact(n)
        .map(|px| {
            let inside = px
                .iter()
                .zip(lo.iter().zip(&hi))
                .all(|(&v, (&l, &h))| v >= l && v <= h);
            if inside { FOREGROUND } else { BACKGROUND }
        })
        .collect();
    Ok(Raster::from_vec(raster.width(), raster.height(), Channels::Gray, data)?)
}
