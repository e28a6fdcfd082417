//! Fill-ratio validation of detected circles
//!
//! The ratio divides the number of foreground mask pixels inside a disk by
//! the disk's analytic area `π·r²`, not by the number of pixels the disk
//! covers. The two differ slightly through discretisation and clipping at
//! the raster edge; the acceptance threshold is tuned against the analytic
//! denominator.

use crate::{DetectError, DetectResult};
use boardcheck_core::{Channels, Circle, Raster};

/// Fraction of the disk's analytic area covered by foreground pixels.
///
/// Pixels are scanned over the circle's bounding square clipped to the
/// raster; a pixel counts when it is non-zero and its center lies within
/// `radius` of the circle's center. A circle of radius 0 (or less) has
/// ratio 0.
///
/// # Errors
///
/// Returns [`DetectError::UnsupportedChannels`] for a color mask.
pub fn fill_ratio(mask: &Raster, circle: &Circle) -> DetectResult<f64> {
    if mask.channels() != Channels::Gray {
        return Err(DetectError::UnsupportedChannels {
            expected: "1 (binary mask)",
            actual: mask.channels() as u32,
        });
    }
    if circle.radius <= 0.0 || !circle.radius.is_finite() {
        return Ok(0.0);
    }

    let bounds = circle.bounding_rect();
    let x0 = bounds.x.max(0);
    let y0 = bounds.y.max(0);
    let x1 = bounds.right().min(mask.width() as i32);
    let y1 = bounds.bottom().min(mask.height() as i32);

    let mut count = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            if circle.contains_point(x as f64, y as f64)
                && mask.get_pixel_unchecked(x as u32, y as u32) != 0
            {
                count += 1;
            }
        }
    }
    Ok(count as f64 / circle.area())
}

/// Keep the circles whose fill ratio on `mask` is strictly greater than
/// `fill_threshold`, preserving order.
///
/// # Errors
///
/// Returns [`DetectError::InvalidParameters`] unless
/// `0 < fill_threshold < 1`.
pub fn validate_circles(mask: &Raster, circles: &[Circle], fill_threshold: f64) -> DetectResult<Vec<Circle>> {
    if !(fill_threshold > 0.0 && fill_threshold < 1.0) {
        return Err(DetectError::InvalidParameters(format!(
            "fill threshold must lie in (0, 1), got {}",
            fill_threshold
        )));
    }

    let mut kept = Vec::with_capacity(circles.len());
    for circle in circles {
        let ratio = fill_ratio(mask, circle)?;
        if ratio > fill_threshold {
            kept.push(*circle);
        } else {
            tracing::trace!(?circle, ratio, "circle rejected by fill ratio");
        }
    }
    tracing::debug!(
        candidates = circles.len(),
        kept = kept.len(),
        "fill-ratio validation"
    );
    Ok(kept)
}
