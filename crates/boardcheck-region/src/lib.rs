//! boardcheck-region - Region analysis for binary masks
//!
//! - **Connected components** ([`conncomp`]): two-pass union-find labeling
//!   with per-component bounding boxes, areas and centroids
//! - **Size selection** ([`select`]): strict area band filtering
//! - **Seed fill** ([`seedfill`]): hole filling and chamfer distance
//!   transforms
//!
//! # Examples
//!
//! ```
//! use boardcheck_core::{Channels, Raster};
//! use boardcheck_region::{Connectivity, label_components};
//!
//! let mut mask = Raster::new(10, 10, Channels::Gray).unwrap();
//! mask.set_pixel(1, 1, 255).unwrap();
//! mask.set_pixel(2, 2, 255).unwrap();
//! mask.set_pixel(7, 7, 255).unwrap();
//!
//! let labeling = label_components(&mask, Connectivity::EightWay).unwrap();
//! assert_eq!(labeling.num_labels(), 2);
//! ```

pub mod conncomp;
mod error;
pub mod seedfill;
pub mod select;

pub use conncomp::{Centroid, ComponentLabeling, ComponentStats, Connectivity, label_components};
pub use error::{RegionError, RegionResult};
pub use seedfill::{Boundary, DistanceMetric, distance_transform, fill_holes};
pub use select::filter_by_area;
