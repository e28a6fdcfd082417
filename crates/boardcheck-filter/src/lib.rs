//! boardcheck-filter - Image filtering operations
//!
//! - Separable Gaussian smoothing with reflected borders ([`convolve`])
//! - Sobel gradients for edge-driven detectors ([`edge`])
//! - 3×3 local-sum band selection on distance fields ([`windowed`])

pub mod convolve;
pub mod edge;
mod error;
pub mod kernel;
pub mod windowed;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel1D;

pub use convolve::{convolve_sep, gaussian_blur};
pub use edge::{Gradient, sobel_gradient};
pub use windowed::{local_sum_3x3, local_sum_refilter};
