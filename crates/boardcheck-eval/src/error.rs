//! Error types for boardcheck-eval

use thiserror::Error;

/// Errors that can occur while reading annotations or scoring recipes
#[derive(Debug, Error)]
pub enum EvalError {
    /// Malformed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An annotated object lacks a required element
    #[error("object {object}: missing <{field}>")]
    MissingField { object: usize, field: &'static str },

    /// A coordinate element does not hold a number
    #[error("object {object}: <{field}> is not a number: '{value}'")]
    InvalidNumber {
        object: usize,
        field: &'static str,
        value: String,
    },

    /// Sweep grid has an empty axis or no valid combination
    #[error("invalid sweep grid: {0}")]
    InvalidGrid(String),

    /// Recipe failure
    #[error("pipeline error: {0}")]
    Pipeline(#[from] boardcheck_pipeline::PipelineError),

    /// Annotation file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;
