//! boardcheck-detect - Circle detection for board inspection
//!
//! - **Hough detector** ([`hough`]): gradient-directed circle voting with
//!   deterministic peak ordering
//! - **Fill-ratio validator** ([`fill_ratio`]): rejects circles whose disk
//!   is mostly background in a reference mask
//! - **Highlights** ([`highlight`]): circles placed on labeled regions so
//!   defects can be drawn

mod error;
pub mod fill_ratio;
pub mod highlight;
pub mod hough;

pub use error::{DetectError, DetectResult};
pub use fill_ratio::{fill_ratio, validate_circles};
pub use highlight::{bounding_box_circles, centroid_circles};
pub use hough::{HoughParams, ScoredCircle, detect_circles, detect_circles_scored};
