//! Integer-valued side rasters produced by measurement stages
//!
//! - [`LabelMap`] - connected-component label per pixel (0 = background)
//! - [`DistanceField`] - chamfer distance to the nearest background pixel
//!
//! Both share the spatial dimensions of the mask they were derived from
//! and are plain owned buffers, like [`Raster`](crate::Raster).

use crate::error::{Error, Result};

macro_rules! u32_field {
    ($name:ident) => {
        impl $name {
            /// Create a zero-filled field.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidDimension`] if width or height is 0.
            pub fn new(width: u32, height: u32) -> Result<Self> {
                if width == 0 || height == 0 {
                    return Err(Error::InvalidDimension { width, height });
                }
                Ok(Self {
                    width,
                    height,
                    data: vec![0; width as usize * height as usize],
                })
            }

            /// Wrap an existing buffer of `width * height` values.
            pub fn from_vec(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
                if width == 0 || height == 0 {
                    return Err(Error::InvalidDimension { width, height });
                }
                let expected = width as usize * height as usize;
                if data.len() != expected {
                    return Err(Error::BufferSize {
                        expected,
                        actual: data.len(),
                    });
                }
                Ok(Self {
                    width,
                    height,
                    data,
                })
            }

            #[inline]
            pub fn width(&self) -> u32 {
                self.width
            }

            #[inline]
            pub fn height(&self) -> u32 {
                self.height
            }

            #[inline]
            pub fn dimensions(&self) -> (u32, u32) {
                (self.width, self.height)
            }

            #[inline]
            pub fn data(&self) -> &[u32] {
                &self.data
            }

            #[inline]
            pub fn data_mut(&mut self) -> &mut [u32] {
                &mut self.data
            }

            /// Value at (x, y), or `None` out of bounds.
            pub fn get(&self, x: u32, y: u32) -> Option<u32> {
                if x >= self.width || y >= self.height {
                    return None;
                }
                Some(self.data[y as usize * self.width as usize + x as usize])
            }

            #[inline]
            pub fn get_unchecked(&self, x: u32, y: u32) -> u32 {
                self.data[y as usize * self.width as usize + x as usize]
            }

            #[inline]
            pub fn set_unchecked(&mut self, x: u32, y: u32, val: u32) {
                self.data[y as usize * self.width as usize + x as usize] = val;
            }
        }
    };
}

/// Per-pixel connected-component labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

u32_field!(LabelMap);

impl LabelMap {
    /// Largest label present, 0 for an all-background map.
    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}

/// Per-pixel distance to the nearest background pixel
///
/// Background pixels hold 0. A foreground pixel that cannot reach any
/// background pixel (the mask is entirely foreground and the raster
/// border does not count as background) holds [`DistanceField::UNREACHED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

u32_field!(DistanceField);

impl DistanceField {
    /// Sentinel for "no background reachable". Small enough that nine of
    /// them still sum inside `u32`.
    pub const UNREACHED: u32 = u32::MAX / 16;

    /// Largest finite distance in the field.
    pub fn max_distance(&self) -> u32 {
        self.data
            .iter()
            .copied()
            .filter(|&d| d != Self::UNREACHED)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_map_access() {
        let mut m = LabelMap::new(3, 2).unwrap();
        m.set_unchecked(2, 1, 7);
        assert_eq!(m.get(2, 1), Some(7));
        assert_eq!(m.get(3, 1), None);
        assert_eq!(m.max_label(), 7);
    }

    #[test]
    fn test_distance_field_from_vec() {
        assert!(DistanceField::from_vec(2, 2, vec![0; 3]).is_err());
        let f = DistanceField::from_vec(2, 1, vec![3, DistanceField::UNREACHED]).unwrap();
        assert_eq!(f.max_distance(), 3);
    }
}
