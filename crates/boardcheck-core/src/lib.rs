//! boardcheck-core - Basic data structures for PCB image inspection
//!
//! This crate provides the fundamental data structures shared by every
//! stage of the inspection pipelines:
//!
//! - [`Raster`] - 8-bit image with 1 (gray / mask) or 3 (RGB) channels
//! - [`LabelMap`] - connected-component labels
//! - [`DistanceField`] - chamfer distance values
//! - [`Rect`] / [`Circle`] - geometry in raster coordinates
//! - [`Color`] - overlay color for annotations

pub mod error;
pub mod field;
pub mod geometry;
pub mod raster;

pub use error::{Error, Result};
pub use field::{DistanceField, LabelMap};
pub use geometry::{Circle, Rect};
pub use raster::convert::luminance;
pub use raster::graphics::{generate_circle_outline_points, generate_filled_circle_points};
pub use raster::{BACKGROUND, Channels, Color, FOREGROUND, Raster};
