//! Error types for boardcheck-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] boardcheck_core::Error),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Input has the wrong number of channels for this operation
    #[error("unsupported channel count: expected {expected}, got {actual}")]
    UnsupportedChannels {
        /// Expected channel description
        expected: &'static str,
        /// Actual channel count
        actual: u32,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
