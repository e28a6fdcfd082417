//! Error types for boardcheck-color

use thiserror::Error;

/// Errors that can occur during thresholding and segmentation
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] boardcheck_core::Error),

    /// Input has the wrong number of channels for this operation
    #[error("unsupported channel count: expected {expected}, got {actual}")]
    UnsupportedChannels { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
