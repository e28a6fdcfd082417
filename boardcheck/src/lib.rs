//! boardcheck - PCB defect inspection for Rust
//!
//! Finds two defect classes in printed-circuit-board photographs by
//! chaining classical raster operations:
//!
//! - Missing holes: thresholding, closing, area filtering, Hough circles
//!   validated by fill ratio
//! - Mouse bites: copper color segmentation, morphology, and banding of a
//!   chamfer distance field
//!
//! A third recipe marks differences against a defect-free reference.
//!
//! # Example
//!
//! ```
//! use boardcheck::{Channels, Raster};
//! use boardcheck::pipeline::{PipelineParameters, Recipe};
//!
//! let board = Raster::new(64, 64, Channels::Rgb).unwrap();
//! let detection = Recipe::MouseBite
//!     .run(&board, &PipelineParameters::default())
//!     .unwrap();
//! assert_eq!(detection.annotated.dimensions(), (64, 64));
//! ```

// Re-export core types (used by every stage)
pub use boardcheck_core::*;

// Re-export stage crates as modules to avoid name conflicts
pub use boardcheck_color as color;
pub use boardcheck_detect as detect;
pub use boardcheck_eval as eval;
pub use boardcheck_filter as filter;
pub use boardcheck_io as io;
pub use boardcheck_morph as morph;
pub use boardcheck_pipeline as pipeline;
pub use boardcheck_region as region;
