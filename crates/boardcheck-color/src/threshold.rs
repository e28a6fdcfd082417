//! Fixed-level binarization
//!
//! Produces 1-channel rasters holding only `0` and `max_value`.

use crate::{ColorError, ColorResult};
use boardcheck_core::{Channels, Raster};

/// Polarity of a fixed threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ThresholdKind {
    /// `v > level` becomes `max_value`, everything else 0
    #[default]
    Binary,
    /// `v > level` becomes 0, everything else `max_value`
    BinaryInv,
}

/// Binarize a grayscale raster against a fixed level.
///
/// # Arguments
///
/// * `raster` - 1-channel input
/// * `level` - comparison level; the test is strictly `v > level`
/// * `max_value` - value written for pixels that pass
/// * `kind` - polarity of the result
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedChannels`] for color input.
pub fn threshold(raster: &Raster, level: u8, max_value: u8, kind: ThresholdKind) -> ColorResult<Raster> {
    if raster.channels() != Channels::Gray {
        return Err(ColorError::UnsupportedChannels {
            expected: "1 (grayscale)",
            actual: raster.channels() as u32,
        });
    }

    let (above, below) = match kind {
        ThresholdKind::Binary => (max_value, 0),
        ThresholdKind::BinaryInv => (0, max_value),
    };

    let data = raster
        .data()
        .iter()
        .map(|&v| if v > level { above } else { below })
        .collect();
    Ok(Raster::from_vec(raster.width(), raster.height(), Channels::Gray, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Raster {
        let data = (0..=255u8).collect();
        Raster::from_vec(16, 16, Channels::Gray, data).unwrap()
    }

    #[test]
    fn test_binary_is_strict() {
        let out = threshold(&ramp(), 100, 255, ThresholdKind::Binary).unwrap();
        assert_eq!(out.data()[100], 0);
        assert_eq!(out.data()[101], 255);
        assert_eq!(out.count_foreground(), 155);
    }

    #[test]
    fn test_binary_inv_complements() {
        let a = threshold(&ramp(), 100, 255, ThresholdKind::Binary).unwrap();
        let b = threshold(&ramp(), 100, 255, ThresholdKind::BinaryInv).unwrap();
        assert!(a.data().iter().zip(b.data()).all(|(x, y)| x ^ y == 255));
    }

    #[test]
    fn test_custom_max_value() {
        let out = threshold(&ramp(), 0, 7, ThresholdKind::Binary).unwrap();
        assert_eq!(out.data()[0], 0);
        assert_eq!(out.data()[1], 7);
    }

    #[test]
    fn test_rejects_color() {
        let rgb = Raster::new(2, 2, Channels::Rgb).unwrap();
        assert!(threshold(&rgb, 10, 255, ThresholdKind::Binary).is_err());
    }
}
