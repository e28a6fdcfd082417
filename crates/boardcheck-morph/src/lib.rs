//! boardcheck-morph - Morphological operations for image processing
//!
//! - Structuring elements ([`Sel`]) in rectangular and elliptical shapes
//! - Grayscale erosion, dilation, opening and closing with a configurable
//!   border value ([`morphology`])

mod error;
pub mod morphology;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use morphology::{BorderMode, MorphOp, close, dilate, erode, morph, open};
pub use sel::{Sel, SelShape};
