//! Grayscale morphology
//!
//! Dilation takes the maximum and erosion the minimum over the hits of a
//! structuring element. On binary masks (0 and 255) these are the usual
//! binary operations. Pixels outside the raster take a value chosen by
//! [`BorderMode`].
//!
//! - Dilation: `out(p) = max over o in sel of in(p - o)`
//! - Erosion: `out(p) = min over o in sel of in(p + o)`
//! - Opening: erosion followed by dilation with the same element
//! - Closing: dilation followed by erosion with the same element

use crate::{MorphError, MorphResult, Sel};
use boardcheck_core::{Channels, Raster};

/// Value of samples outside the raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderMode {
    /// Every outside sample has this value
    Constant(u8),
    /// Outside samples repeat the nearest edge sample
    Replicate,
}

impl Default for BorderMode {
    fn default() -> Self {
        BorderMode::Constant(0)
    }
}

/// Morphological operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphOp {
    Dilate,
    Erode,
    Open,
    Close,
}

fn check_gray(raster: &Raster) -> MorphResult<()> {
    if raster.channels() != Channels::Gray {
        return Err(MorphError::UnsupportedChannels {
            expected: "1 (grayscale)",
            actual: raster.channels() as u32,
        });
    }
    Ok(())
}

#[inline]
fn sample(raster: &Raster, x: i32, y: i32, border: BorderMode) -> u8 {
    let w = raster.width() as i32;
    let h = raster.height() as i32;
    if x >= 0 && y >= 0 && x < w && y < h {
        return raster.get_pixel_unchecked(x as u32, y as u32);
    }
    match border {
        BorderMode::Constant(v) => v,
        BorderMode::Replicate => {
            raster.get_pixel_unchecked(x.clamp(0, w - 1) as u32, y.clamp(0, h - 1) as u32)
        }
    }
}

/// Apply a min or max over the shifted hit positions. `sign` is -1 for
/// dilation (reflected element) and +1 for erosion.
fn rank_extreme(raster: &Raster, sel: &Sel, border: BorderMode, sign: i32, take_max: bool) -> Raster {
    let offsets: Vec<(i32, i32)> = sel
        .hit_offsets()
        .map(|(dx, dy)| (sign * dx, sign * dy))
        .collect();
    let mut out = raster.create_template();
    let w = raster.width();

    for y in 0..raster.height() {
        let row = out.row_mut(y);
        for x in 0..w {
            let mut acc = if take_max { u8::MIN } else { u8::MAX };
            for &(dx, dy) in &offsets {
                let v = sample(raster, x as i32 + dx, y as i32 + dy, border);
                acc = if take_max { acc.max(v) } else { acc.min(v) };
            }
            row[x as usize] = acc;
        }
    }
    out
}

/// Dilate a 1-channel raster
///
/// # Errors
///
/// Returns [`MorphError::UnsupportedChannels`] for color input.
pub fn dilate(raster: &Raster, sel: &Sel, border: BorderMode) -> MorphResult<Raster> {
    check_gray(raster)?;
    Ok(rank_extreme(raster, sel, border, -1, true))
}

/// Erode a 1-channel raster
pub fn erode(raster: &Raster, sel: &Sel, border: BorderMode) -> MorphResult<Raster> {
    check_gray(raster)?;
    Ok(rank_extreme(raster, sel, border, 1, false))
}

/// Open a 1-channel raster (erode, then dilate)
///
/// Removes foreground features smaller than the element.
pub fn open(raster: &Raster, sel: &Sel, border: BorderMode) -> MorphResult<Raster> {
    let eroded = erode(raster, sel, border)?;
    dilate(&eroded, sel, border)
}

/// Close a 1-channel raster (dilate, then erode)
///
/// Fills background gaps smaller than the element.
pub fn close(raster: &Raster, sel: &Sel, border: BorderMode) -> MorphResult<Raster> {
    let dilated = dilate(raster, sel, border)?;
    erode(&dilated, sel, border)
}

/// Dispatch a [`MorphOp`]
pub fn morph(raster: &Raster, op: MorphOp, sel: &Sel, border: BorderMode) -> MorphResult<Raster> {
    match op {
        MorphOp::Dilate => dilate(raster, sel, border),
        MorphOp::Erode => erode(raster, sel, border),
        MorphOp::Open => open(raster, sel, border),
        MorphOp::Close => close(raster, sel, border),
    }
}
