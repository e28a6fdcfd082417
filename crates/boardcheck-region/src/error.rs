//! Error types for boardcheck-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] boardcheck_core::Error),

    /// Input has the wrong number of channels for this operation
    #[error("unsupported channel count: expected {expected}, got {actual}")]
    UnsupportedChannels { expected: &'static str, actual: u32 },

    /// A labeling was paired with a mask of different dimensions
    #[error("labeling is {labels:?} but mask is {mask:?}")]
    LabelingMismatch { mask: (u32, u32), labels: (u32, u32) },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;

pub(crate) fn check_mask(raster: &boardcheck_core::Raster) -> RegionResult<()> {
    if raster.channels() != boardcheck_core::Channels::Gray {
        return Err(RegionError::UnsupportedChannels {
            expected: "1 (binary mask)",
            actual: raster.channels() as u32,
        });
    }
    Ok(())
}
