//! boardcheck-pipeline - Defect detection recipes
//!
//! This crate chains the raster stages of the other boardcheck crates into
//! complete inspections:
//!
//! - **Missing-Hole**: [`missing_hole`] finds hole-sized circular regions
//! - **Mouse-Bite**: [`mouse_bite`] finds notches along copper traces
//! - **Difference**: [`difference`] marks changes against a reference board
//!
//! Every tunable lives in [`PipelineParameters`], which loads from partial
//! JSON and is validated before any stage runs. Stages pass an explicit
//! [`Step`] snapshot so derived tables never outlive the raster they were
//! computed from.
//!
//! # Example
//!
//! ```
//! use boardcheck_core::{Channels, Raster};
//! use boardcheck_pipeline::{PipelineParameters, Recipe};
//!
//! let board = Raster::new(64, 64, Channels::Rgb).unwrap();
//! let params = PipelineParameters::default();
//! let detection = Recipe::MissingHole.run(&board, &params).unwrap();
//! assert!(detection.circles.is_empty());
//! ```

mod error;
pub mod params;
pub mod recipes;
pub mod step;

pub use error::{PipelineError, PipelineResult};
pub use params::{
    DifferenceParams, DistanceParams, DrawParams, MissingHoleParams, MouseBiteParams,
    PipelineParameters, RefilterParams, SelParams,
};
pub use recipes::{Detection, Recipe, difference, missing_hole, mouse_bite};
pub use step::Step;
