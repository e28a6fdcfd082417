//! Sobel gradients
//!
//! Convolves a 3×3 kernel pair with border clamping and keeps the signed
//! components alongside the magnitude, since circle voting needs the
//! gradient direction as well as its strength.

use crate::{FilterError, FilterResult};
use boardcheck_core::{Channels, Raster};

type Kernel3 = [[i32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Per-pixel gradient of a grayscale raster
#[derive(Debug, Clone)]
pub struct Gradient {
    width: u32,
    height: u32,
    /// Horizontal derivative
    pub gx: Vec<i32>,
    /// Vertical derivative
    pub gy: Vec<i32>,
}

impl Gradient {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Euclidean magnitude at (x, y).
    #[inline]
    pub fn magnitude(&self, x: u32, y: u32) -> f64 {
        let i = (y * self.width + x) as usize;
        (self.gx[i] as f64).hypot(self.gy[i] as f64)
    }

    /// Unit direction at (x, y), or `None` where the gradient vanishes.
    pub fn direction(&self, x: u32, y: u32) -> Option<(f64, f64)> {
        let i = (y * self.width + x) as usize;
        let (gx, gy) = (self.gx[i] as f64, self.gy[i] as f64);
        let m = gx.hypot(gy);
        if m == 0.0 {
            None
        } else {
            Some((gx / m, gy / m))
        }
    }

    /// Coordinates of every pixel whose magnitude is at least `threshold`,
    /// in raster order.
    pub fn edge_points(&self, threshold: f64) -> Vec<(u32, u32)> {
        let mut points = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let m = self.magnitude(x, y);
                if m > 0.0 && m >= threshold {
                    points.push((x, y));
                }
            }
        }
        points
    }
}

/// Sobel gradient of a 1-channel raster.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedChannels`] for color input.
pub fn sobel_gradient(raster: &Raster) -> FilterResult<Gradient> {
    if raster.channels() != Channels::Gray {
        return Err(FilterError::UnsupportedChannels {
            expected: "1 (grayscale)",
            actual: raster.channels() as u32,
        });
    }

    let w = raster.width() as usize;
    let h = raster.height() as usize;
    let src = raster.data();
    let mut gx = vec![0i32; w * h];
    let mut gy = vec![0i32; w * h];

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let mut sum_x = 0;
            let mut sum_y = 0;
            for (ky, &yy) in y_idx.iter().enumerate() {
                for (kx, &xx) in x_idx.iter().enumerate() {
                    let v = src[yy * w + xx] as i32;
                    sum_x += v * SOBEL_KERNEL_X[ky][kx];
                    sum_y += v * SOBEL_KERNEL_Y[ky][kx];
                }
            }
            gx[y * w + x] = sum_x;
            gy[y * w + x] = sum_y;
        }
    }

    Ok(Gradient {
        width: raster.width(),
        height: raster.height(),
        gx,
        gy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_step() {
        let mut r = Raster::new(6, 3, Channels::Gray).unwrap();
        for y in 0..3 {
            for x in 3..6 {
                r.set_pixel(x, y, 100).unwrap();
            }
        }
        let g = sobel_gradient(&r).unwrap();
        assert_eq!(g.gx[6 + 2], 400);
        assert_eq!(g.gy[6 + 2], 0);
        assert_eq!(g.direction(2, 1), Some((1.0, 0.0)));
        assert_eq!(g.magnitude(0, 1), 0.0);
        assert_eq!(g.direction(0, 1), None);
        assert_eq!(g.edge_points(255.0).len(), 6);
    }

    #[test]
    fn test_flat_has_no_edges() {
        let r = Raster::new_filled(5, 5, Channels::Gray, 90).unwrap();
        let g = sobel_gradient(&r).unwrap();
        assert!(g.edge_points(0.0).is_empty());
    }
}
