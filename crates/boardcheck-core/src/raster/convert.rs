//! Channel conversions
//!
//! Color to grayscale uses the ITU-R BT.601 luma weights
//! `0.299 R + 0.587 G + 0.114 B`, rounded to the nearest integer.

use super::{Channels, Raster};

const WEIGHT_RED: f32 = 0.299;
const WEIGHT_GREEN: f32 = 0.587;
const WEIGHT_BLUE: f32 = 0.114;

/// Luma of a single RGB triple.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let v = WEIGHT_RED * r as f32 + WEIGHT_GREEN * g as f32 + WEIGHT_BLUE * b as f32;
    v.round().clamp(0.0, 255.0) as u8
}

impl Raster {
    /// Convert to a 1-channel grayscale raster.
    ///
    /// A raster that is already grayscale is returned as a copy.
    pub fn to_gray(&self) -> Raster {
        match self.channels() {
            Channels::Gray => self.clone(),
            Channels::Rgb => {
                let data = self
                    .data()
                    .chunks_exact(3)
                    .map(|px| luminance(px[0], px[1], px[2]))
                    .collect();
                Raster {
                    width: self.width(),
                    height: self.height(),
                    channels: Channels::Gray,
                    data,
                }
            }
        }
    }

    /// Convert to a 3-channel raster by replicating the gray value.
    ///
    /// A raster that is already RGB is returned as a copy.
    pub fn to_rgb(&self) -> Raster {
        match self.channels() {
            Channels::Rgb => self.clone(),
            Channels::Gray => {
                let data = self.data().iter().flat_map(|&v| [v, v, v]).collect();
                Raster {
                    width: self.width(),
                    height: self.height(),
                    channels: Channels::Rgb,
                    data,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(255, 0, 0), 76);
        assert_eq!(luminance(0, 255, 0), 150);
        assert_eq!(luminance(0, 0, 255), 29);
    }

    #[test]
    fn test_round_trip_gray() {
        let mut g = Raster::new(2, 1, Channels::Gray).unwrap();
        g.set_pixel(1, 0, 77).unwrap();
        let rgb = g.to_rgb();
        assert_eq!(rgb.get_rgb(1, 0), Some((77, 77, 77)));
        assert_eq!(rgb.to_gray(), g);
    }
}
