//! Error types for boardcheck-pipeline

use thiserror::Error;

/// Errors that can occur while configuring or running a recipe
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] boardcheck_core::Error),

    /// Thresholding or color segmentation error
    #[error("color error: {0}")]
    Color(#[from] boardcheck_color::ColorError),

    /// Filtering error
    #[error("filter error: {0}")]
    Filter(#[from] boardcheck_filter::FilterError),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] boardcheck_morph::MorphError),

    /// Region analysis error
    #[error("region error: {0}")]
    Region(#[from] boardcheck_region::RegionError),

    /// Detection error
    #[error("detection error: {0}")]
    Detect(#[from] boardcheck_detect::DetectError),

    /// A parameter set failed validation
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A stage needed an artifact the current step does not carry
    #[error("stage '{stage}' requires a {artifact} from the preceding step")]
    MissingArtifact {
        stage: &'static str,
        artifact: &'static str,
    },

    /// Inspected and reference rasters differ in size
    #[error("inspected image is {inspected:?} but reference is {reference:?}")]
    SizeMismatch {
        inspected: (u32, u32),
        reference: (u32, u32),
    },

    /// Parameter file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parameter file could not be parsed or serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
