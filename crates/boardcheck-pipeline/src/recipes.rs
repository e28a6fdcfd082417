//! Defect recipes
//!
//! Each recipe validates its parameters, runs a fixed chain of [`Step`]
//! stages and draws the resulting circles on a color copy of the input.

use crate::params::PipelineParameters;
use crate::step::Step;
use crate::{PipelineError, PipelineResult};
use boardcheck_color::ThresholdKind;
use boardcheck_core::{Circle, Color, Raster};
use boardcheck_detect::{bounding_box_circles, centroid_circles, detect_circles, validate_circles};
use boardcheck_morph::MorphOp;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Result of one recipe run
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Color copy of the input with every circle drawn on it
    pub annotated: Raster,
    /// Circles in detection order
    pub circles: Vec<Circle>,
}

/// Single-image defect recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipe {
    MissingHole,
    MouseBite,
}

impl Recipe {
    pub const ALL: [Recipe; 2] = [Recipe::MissingHole, Recipe::MouseBite];

    pub fn name(self) -> &'static str {
        match self {
            Recipe::MissingHole => "missing-hole",
            Recipe::MouseBite => "mouse-bite",
        }
    }

    /// Run the recipe on one image.
    pub fn run(self, image: &Raster, params: &PipelineParameters) -> PipelineResult<Detection> {
        match self {
            Recipe::MissingHole => missing_hole(image, params),
            Recipe::MouseBite => mouse_bite(image, params),
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Recipe {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Recipe::ALL
            .into_iter()
            .find(|r| r.name() == s || r.name().replace('-', "_") == s)
            .ok_or_else(|| PipelineError::InvalidParameter(format!("unknown recipe '{}'", s)))
    }
}

fn annotate(image: &Raster, circles: &[Circle], color: Color, thickness: u32) -> Raster {
    let mut annotated = image.to_rgb();
    annotated.draw_circles(circles, color, thickness);
    annotated
}

/// Locate drill-hole sites as validated circles.
///
/// The board is binarized, closed and re-thresholded so that holes become
/// foreground; components of plausible hole size are kept. Circle
/// candidates from the Hough detector are accepted only when the kept
/// mask fills more than `fill_threshold` of their analytic area.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidParameter`] for invalid parameters,
/// and stage errors otherwise. An image without holes is not an error.
pub fn missing_hole(image: &Raster, params: &PipelineParameters) -> PipelineResult<Detection> {
    params.validate()?;
    let p = &params.missing_hole;

    let holes = Step::new(image.clone())
        .gray()
        .blur(p.blur_ksize)?
        .threshold(p.board_level, ThresholdKind::Binary)?
        .morph(MorphOp::Close, &p.close_sel)?
        .threshold(p.hole_level, p.hole_kind)?
        .label()?
        .area_filter(p.min_area, p.max_area)?;

    let smoothed = holes.clone().blur(p.hough_blur_ksize)?;
    let candidates = detect_circles(smoothed.raster(), &p.hough)?;
    let circles = validate_circles(holes.raster(), &candidates, p.fill_threshold)?;
    if candidates.len() > circles.len() {
        debug!(
            rejected = candidates.len() - circles.len(),
            "fill ratio rejected candidates"
        );
    }

    info!(
        recipe = "missing-hole",
        candidates = candidates.len(),
        circles = circles.len(),
        "recipe complete"
    );
    let annotated = annotate(image, &circles, params.draw.color, params.draw.thickness);
    Ok(Detection { annotated, circles })
}

/// Find notches bitten out of copper traces.
///
/// Copper is segmented by color, cleaned morphologically, and its
/// distance field is banded twice by local sums so that only ragged trace
/// edges survive. Each surviving component is marked with a fixed-radius
/// circle at its centroid.
pub fn mouse_bite(image: &Raster, params: &PipelineParameters) -> PipelineResult<Detection> {
    params.validate()?;
    let p = &params.mouse_bite;

    let defects = Step::new(image.clone())
        .blur(p.blur_ksize)?
        .in_range(p.copper_lower, p.copper_upper)?
        .label()?
        .area_filter(p.min_area, p.max_area)?
        .morph(MorphOp::Dilate, &p.dilate_sel)?
        .morph(MorphOp::Open, &p.open_sel)?
        .morph(MorphOp::Close, &p.close_sel)?
        .distance_transform(&p.distance)?
        .refilter(&p.first_refilter)?
        .morph(MorphOp::Dilate, &p.second_dilate_sel)?
        .morph(MorphOp::Open, &p.second_open_sel)?
        .distance_transform(&p.distance)?
        .refilter(&p.second_refilter)?
        .label()?;

    let circles = centroid_circles(defects.require_labeling("highlight")?, p.highlight_radius);
    info!(recipe = "mouse-bite", circles = circles.len(), "recipe complete");
    let annotated = annotate(image, &circles, params.draw.color, params.draw.thickness);
    Ok(Detection { annotated, circles })
}

/// Mark regions where an inspected image differs from a defect-free reference
/// of the same size.
///
/// Each changed region is filled, labeled, and enclosed by a circle
/// around its bounding box; circles are drawn on the inspected image.
///
/// # Errors
///
/// Returns [`PipelineError::SizeMismatch`] if the rasters differ in size.
pub fn difference(inspected: &Raster, reference: &Raster, params: &PipelineParameters) -> PipelineResult<Detection> {
    params.validate()?;
    if inspected.dimensions() != reference.dimensions() {
        return Err(PipelineError::SizeMismatch {
            inspected: inspected.dimensions(),
            reference: reference.dimensions(),
        });
    }
    let d = &params.difference;

    let diff = inspected.to_gray().abs_diff(&reference.to_gray())?;
    let regions = Step::new(diff)
        .threshold(d.threshold, ThresholdKind::Binary)?
        .fill_holes()?
        .label()?;

    let circles = bounding_box_circles(regions.require_labeling("highlight")?);
    if circles.is_empty() {
        warn!("inspected image matches reference; no differences found");
    }
    info!(recipe = "difference", circles = circles.len(), "recipe complete");
    let annotated = annotate(inspected, &circles, d.color, d.thickness);
    Ok(Detection { annotated, circles })
}
