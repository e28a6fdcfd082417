//! Separable convolution
//!
//! Border handling reflects without repeating the edge sample
//! (`...c b | a b c d | c b...`), applied independently to each channel.

use crate::{FilterResult, Kernel1D};
use boardcheck_core::Raster;

/// Map an out-of-range index into `[0, n)` by reflection about the edge
/// samples.
#[inline]
fn reflect_101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let period = 2 * (n - 1);
    let mut j = i.rem_euclid(period);
    if j >= n {
        j = period - j;
    }
    j as usize
}

/// Convolve every channel with `kernel_x` along rows, then `kernel_y`
/// along columns.
///
/// The intermediate pass keeps full precision; the result is rounded to
/// the nearest integer and clamped to `[0, 255]`.
pub fn convolve_sep(raster: &Raster, kernel_x: &Kernel1D, kernel_y: &Kernel1D) -> FilterResult<Raster> {
    let w = raster.width() as usize;
    let h = raster.height() as usize;
    let n = raster.channels().count();
    let src = raster.data();

    let kx = kernel_x.data();
    let cx = kernel_x.center() as isize;
    let mut tmp = vec![0.0f32; src.len()];
    for y in 0..h {
        let row = y * w * n;
        for x in 0..w {
            for c in 0..n {
                let mut sum = 0.0f32;
                for (k, &wgt) in kx.iter().enumerate() {
                    let sx = reflect_101(x as isize + k as isize - cx, w);
                    sum += src[row + sx * n + c] as f32 * wgt;
                }
                tmp[row + x * n + c] = sum;
            }
        }
    }

    let ky = kernel_y.data();
    let cy = kernel_y.center() as isize;
    let mut out = raster.create_template();
    let dst = out.data_mut();
    for y in 0..h {
        for x in 0..w {
            for c in 0..n {
                let mut sum = 0.0f32;
                for (k, &wgt) in ky.iter().enumerate() {
                    let sy = reflect_101(y as isize + k as isize - cy, h);
                    sum += tmp[(sy * w + x) * n + c] * wgt;
                }
                dst[(y * w + x) * n + c] = sum.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(out)
}

/// Gaussian blur with a square `ksize` × `ksize` kernel.
///
/// # Arguments
///
/// * `raster` - gray or RGB input
/// * `ksize` - odd kernel size; 1 returns an unchanged copy
/// * `sigma` - standard deviation; `<= 0` derives it from `ksize`
///
/// # Errors
///
/// Returns [`crate::FilterError::InvalidKernel`] for an even or zero size.
pub fn gaussian_blur(raster: &Raster, ksize: u32, sigma: f32) -> FilterResult<Raster> {
    let kernel = Kernel1D::gaussian(ksize, sigma)?;
    if kernel.len() == 1 {
        return Ok(raster.clone());
    }
    convolve_sep(raster, &kernel, &kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardcheck_core::Channels;

    #[test]
    fn test_reflect_101() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(6, 5), 2);
        assert_eq!(reflect_101(-3, 2), 1);
        assert_eq!(reflect_101(4, 1), 0);
    }

    #[test]
    fn test_constant_image_unchanged() {
        let r = Raster::new_filled(9, 7, Channels::Rgb, 77).unwrap();
        let out = gaussian_blur(&r, 5, 0.0).unwrap();
        assert_eq!(out, r);
    }

    #[test]
    fn test_impulse_response() {
        let mut r = Raster::new(9, 9, Channels::Gray).unwrap();
        r.set_pixel(4, 4, 255).unwrap();
        let out = gaussian_blur(&r, 3, 0.0).unwrap();
        // 255 * 0.5 * 0.5, 255 * 0.25 * 0.5, 255 * 0.25 * 0.25
        assert_eq!(out.get_pixel(4, 4), Some(64));
        assert_eq!(out.get_pixel(3, 4), Some(32));
        assert_eq!(out.get_pixel(3, 3), Some(16));
        assert_eq!(out.get_pixel(2, 4), Some(0));
    }

    #[test]
    fn test_edge_reflection() {
        // A bright left column reflects onto itself, not onto a zero border.
        let mut r = Raster::new(5, 1, Channels::Gray).unwrap();
        r.set_pixel(0, 0, 200).unwrap();
        let k = Kernel1D::gaussian(3, 0.0).unwrap();
        let one = Kernel1D::gaussian(1, 0.0).unwrap();
        let out = convolve_sep(&r, &k, &one).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(100));
        assert_eq!(out.get_pixel(1, 0), Some(50));
    }

    #[test]
    fn test_ksize_one_is_identity() {
        let r = Raster::from_vec(2, 2, Channels::Gray, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(gaussian_blur(&r, 1, 0.0).unwrap(), r);
        assert!(gaussian_blur(&r, 2, 0.0).is_err());
    }
}
