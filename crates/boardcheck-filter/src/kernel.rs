//! One-dimensional convolution kernels
//!
//! Smoothing in this crate is separable, so a kernel is a single odd-length
//! row of weights applied once horizontally and once vertically. The center
//! tap is at index `(len - 1) / 2`.

use crate::{FilterError, FilterResult};

/// Binomial weights used for small Gaussian kernels when sigma is derived
/// from the size.
const BINOMIAL_1: [f32; 1] = [1.0];
const BINOMIAL_3: [f32; 3] = [0.25, 0.5, 0.25];
const BINOMIAL_5: [f32; 5] = [1.0 / 16.0, 4.0 / 16.0, 6.0 / 16.0, 4.0 / 16.0, 1.0 / 16.0];
const BINOMIAL_7: [f32; 7] = [
    1.0 / 64.0,
    6.0 / 64.0,
    15.0 / 64.0,
    20.0 / 64.0,
    15.0 / 64.0,
    6.0 / 64.0,
    1.0 / 64.0,
];

/// A separable 1-D kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1D {
    data: Vec<f32>,
}

impl Kernel1D {
    /// Create a kernel from explicit weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `data` is empty or of even
    /// length.
    pub fn from_slice(data: &[f32]) -> FilterResult<Self> {
        if data.is_empty() || data.len() % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel length must be odd, got {}",
                data.len()
            )));
        }
        Ok(Self {
            data: data.to_vec(),
        })
    }

    /// Sigma implied by a kernel size when none is given.
    pub fn derived_sigma(size: u32) -> f32 {
        0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }

    /// Create a normalized Gaussian kernel.
    ///
    /// A `sigma <= 0` is derived from `size` with [`Self::derived_sigma`];
    /// sizes 1, 3, 5 and 7 then use exact binomial weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `size` is even or zero.
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "gaussian kernel size must be odd and >= 1, got {}",
                size
            )));
        }

        if sigma <= 0.0 {
            let table: Option<&[f32]> = match size {
                1 => Some(&BINOMIAL_1),
                3 => Some(&BINOMIAL_3),
                5 => Some(&BINOMIAL_5),
                7 => Some(&BINOMIAL_7),
                _ => None,
            };
            if let Some(t) = table {
                return Self::from_slice(t);
            }
        }

        let sigma = if sigma > 0.0 {
            sigma
        } else {
            Self::derived_sigma(size)
        };
        let half = (size / 2) as i32;
        let denom = 2.0 * sigma * sigma;
        let mut data: Vec<f32> = (-half..=half)
            .map(|i| (-((i * i) as f32) / denom).exp())
            .collect();
        let sum: f32 = data.iter().sum();
        for v in &mut data {
            *v /= sum;
        }
        Ok(Self { data })
    }

    /// Number of taps.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; kernels have at least one tap.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Index of the center tap.
    #[inline]
    pub fn center(&self) -> usize {
        (self.data.len() - 1) / 2
    }

    /// Kernel weights.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial_five() {
        let k = Kernel1D::gaussian(5, 0.0).unwrap();
        assert_eq!(k.data(), &BINOMIAL_5);
        assert_eq!(k.center(), 2);
    }

    #[test]
    fn test_explicit_sigma_normalized() {
        let k = Kernel1D::gaussian(9, 2.0).unwrap();
        assert!((k.sum() - 1.0).abs() < 1e-5);
        assert!(k.data()[4] > k.data()[3]);
        assert!((k.data()[0] - k.data()[8]).abs() < 1e-7);
    }

    #[test]
    fn test_derived_sigma() {
        assert!((Kernel1D::derived_sigma(5) - 1.1).abs() < 1e-6);
        let k = Kernel1D::gaussian(11, -1.0).unwrap();
        assert_eq!(k.len(), 11);
        assert!((k.sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_even_size_rejected() {
        assert!(Kernel1D::gaussian(4, 0.0).is_err());
        assert!(Kernel1D::gaussian(0, 1.0).is_err());
        assert!(Kernel1D::from_slice(&[]).is_err());
    }
}
