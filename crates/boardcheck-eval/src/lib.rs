//! boardcheck-eval - Ground-truth evaluation of defect recipes
//!
//! - [`parse_annotation`] reads Pascal-VOC style box annotations
//! - [`score`] matches detected circles against annotated boxes
//! - [`sweep`] ranks parameter combinations over a set of annotated images
//!
//! The sweep only calls the public recipe API with copied parameter sets;
//! nothing here holds shared mutable state.

pub mod annotation;
mod error;
pub mod score;
pub mod sweep;

pub use annotation::{AnnotatedObject, Annotation, parse_annotation, read_annotation};
pub use error::{EvalError, EvalResult};
pub use score::{Score, score};
pub use sweep::{Sample, SweepGrid, SweepResult, evaluate, sweep};
