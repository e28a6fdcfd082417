//! Error types for boardcheck-detect

use thiserror::Error;

/// Errors that can occur during circle detection and validation
#[derive(Debug, Error)]
pub enum DetectError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] boardcheck_core::Error),

    /// Gradient computation error
    #[error("filter error: {0}")]
    Filter(#[from] boardcheck_filter::FilterError),

    /// Input has the wrong number of channels for this operation
    #[error("unsupported channel count: expected {expected}, got {actual}")]
    UnsupportedChannels { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for detection operations
pub type DetectResult<T> = Result<T, DetectError>;
