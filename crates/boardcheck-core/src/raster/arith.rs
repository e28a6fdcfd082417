//! Pixel-wise arithmetic between rasters

use super::Raster;
use crate::error::{Error, Result};

impl Raster {
    /// Per-sample absolute difference `|self - other|`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ and
    /// [`Error::UnsupportedChannels`] if the channel counts differ.
    pub fn abs_diff(&self, other: &Raster) -> Result<Raster> {
        self.check_same_size(other)?;
        if self.channels() != other.channels() {
            return Err(Error::UnsupportedChannels {
                expected: "matching channel counts",
                actual: other.channels() as u32,
            });
        }
        let mut out = self.create_template();
        for ((d, &a), &b) in out
            .data_mut()
            .iter_mut()
            .zip(self.data())
            .zip(other.data())
        {
            *d = a.abs_diff(b);
        }
        Ok(out)
    }

    /// Photometric inverse: every sample `v` becomes `255 - v`.
    pub fn invert(&self) -> Raster {
        let mut out = self.clone();
        for v in out.data_mut() {
            *v = 255 - *v;
        }
        out
    }
}
