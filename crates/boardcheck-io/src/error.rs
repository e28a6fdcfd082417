//! I/O error types
//!
//! The PNG and JPEG modules map their codec errors into `IoError`, so a
//! batch driver sees one error type per failed image.

use thiserror::Error;

/// Error type for raster I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Missing or unreadable file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Neither PNG nor JPEG, or the format's feature is disabled
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The image data is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// A format-specific decoder returned an error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// A format-specific encoder returned an error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Decoded samples did not form a valid raster
    #[error("core error: {0}")]
    Core(#[from] boardcheck_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
