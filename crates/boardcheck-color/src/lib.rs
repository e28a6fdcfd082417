//! boardcheck-color - Binarization and color segmentation
//!
//! - **Thresholding** ([`threshold`]): fixed-level binarization, normal or inverted
//! - **Range selection** ([`range`]): inclusive per-channel color bounds
//!
//! Both produce binary masks (1-channel, values 0 and 255 unless a custom
//! maximum is requested).

pub mod error;
pub mod range;
pub mod threshold;

pub use error::{ColorError, ColorResult};
pub use range::in_range;
pub use threshold::{ThresholdKind, threshold};
