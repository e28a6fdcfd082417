//! Raster - The main image container
//!
//! A `Raster` is a 2-D grid of 8-bit samples with either one channel
//! (grayscale, binary masks) or three interleaved channels (RGB color).
//!
//! # Pixel layout
//!
//! - Samples are stored row-major with no padding between rows
//! - Color rasters interleave channels as `R, G, B`
//! - Binary masks are 1-channel rasters holding only 0 and 255
//!
//! # Ownership model
//!
//! `Raster` owns its buffer and `Clone` performs a deep copy, so two
//! pipeline branches never observe each other's writes.

pub mod arith;
pub mod convert;
pub mod graphics;

pub use graphics::Color;

use crate::error::{Error, Result};

/// Foreground value of a binary mask.
pub const FOREGROUND: u8 = 255;

/// Background value of a binary mask.
pub const BACKGROUND: u8 = 0;

/// Number of interleaved channels per pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Channels {
    /// Single-channel grayscale or mask
    Gray = 1,
    /// Three-channel RGB color
    Rgb = 3,
}

impl Channels {
    /// Create `Channels` from a raw channel count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] for anything but 1 or 3.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            _ => Err(Error::UnsupportedChannels {
                expected: "1 or 3",
                actual: count,
            }),
        }
    }

    /// Number of samples per pixel.
    #[inline]
    pub fn count(self) -> usize {
        self as usize
    }
}

/// Raster - Main image container
///
/// # Examples
///
/// ```
/// use boardcheck_core::{Channels, Raster};
///
/// let raster = Raster::new(640, 480, Channels::Gray).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.height(), 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl Raster {
    /// Create a new zero-filled raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        Self::new_filled(width, height, channels, 0)
    }

    /// Create a raster with every sample set to `value`.
    pub fn new_filled(width: u32, height: u32, channels: Channels, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize * channels.count();
        Ok(Self {
            width,
            height,
            channels,
            data: vec![value; len],
        })
    }

    /// Wrap an existing sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `data.len()` is not
    /// `width * height * channels`.
    pub fn from_vec(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * channels.count();
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Create a zero-filled raster with the same shape as `self`.
    pub fn create_template(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: vec![0; self.data.len()],
        }
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
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// `(width, height)` pair, handy for error reporting.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels (not samples).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw interleaved samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the raster and return its sample buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Mutable samples of row `y`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    #[inline]
    fn stride(&self) -> usize {
        self.width as usize * self.channels.count()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels.count()
    }

    #[inline]
    fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> Error {
        Error::IndexOutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Get the first sample of the pixel at (x, y).
    ///
    /// For 1-channel rasters this is the pixel value. Returns `None` if
    /// the coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.data[self.offset(x, y)])
    }

    /// Get the first sample of the pixel at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the sample index falls outside the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data[self.offset(x, y)]
    }

    /// Get RGB values at (x, y).
    ///
    /// A 1-channel raster reports its value replicated on all channels.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let i = self.offset(x, y);
        Some(match self.channels {
            Channels::Gray => (self.data[i], self.data[i], self.data[i]),
            Channels::Rgb => (self.data[i], self.data[i + 1], self.data[i + 2]),
        })
    }

    /// Set every sample of the pixel at (x, y) to `val`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set every sample of the pixel at (x, y) without bounds checking.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let i = self.offset(x, y);
        let n = self.channels.count();
        self.data[i..i + n].fill(val);
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// On a 1-channel raster the color is reduced to its luminance.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        self.set_rgb_unchecked(x, y, r, g, b);
        Ok(())
    }

    /// Set an RGB pixel at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the sample index falls outside the buffer.
    #[inline]
    pub fn set_rgb_unchecked(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) {
        let i = self.offset(x, y);
        match self.channels {
            Channels::Gray => self.data[i] = convert::luminance(r, g, b),
            Channels::Rgb => {
                self.data[i] = r;
                self.data[i + 1] = g;
                self.data[i + 2] = b;
            }
        }
    }

    /// Check that two rasters share width and height.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] otherwise.
    pub fn check_same_size(&self, other: &Raster) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    /// Require a 1-channel raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] for color input.
    pub fn check_gray(&self) -> Result<()> {
        if self.channels != Channels::Gray {
            return Err(Error::UnsupportedChannels {
                expected: "1 (grayscale)",
                actual: self.channels as u32,
            });
        }
        Ok(())
    }

    /// Require a 3-channel raster.
    pub fn check_rgb(&self) -> Result<()> {
        if self.channels != Channels::Rgb {
            return Err(Error::UnsupportedChannels {
                expected: "3 (RGB)",
                actual: self.channels as u32,
            });
        }
        Ok(())
    }

    /// True when every sample is exactly 0 or 255.
    pub fn is_binary(&self) -> bool {
        self.data
            .iter()
            .all(|&v| v == FOREGROUND || v == BACKGROUND)
    }

    /// Number of pixels whose first sample is non-zero.
    pub fn count_foreground(&self) -> usize {
        self.data
            .chunks_exact(self.channels.count())
            .filter(|px| px[0] != 0)
            .count()
    }
}
