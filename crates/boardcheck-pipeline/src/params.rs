//! Recipe parameters
//!
//! Every tunable value of every recipe lives here, with defaults equal to
//! the reference settings. All structs deserialize with `#[serde(default)]`,
//! so a JSON file only needs to name the values it changes:
//!
//! ```json
//! { "missing_hole": { "min_area": 150, "fill_threshold": 0.5 } }
//! ```
//!
//! [`PipelineParameters::validate`] runs before the first stage of every
//! recipe, so an inconsistent configuration never reaches pixel code.

use crate::{PipelineError, PipelineResult};
use boardcheck_color::ThresholdKind;
use boardcheck_core::Color;
use boardcheck_detect::HoughParams;
use boardcheck_morph::{MorphResult, Sel, SelShape};
use boardcheck_region::DistanceMetric;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shape and size of a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelParams {
    pub shape: SelShape,
    pub width: u32,
    pub height: u32,
}

impl SelParams {
    pub const fn rect(width: u32, height: u32) -> Self {
        Self {
            shape: SelShape::Rect,
            width,
            height,
        }
    }

    pub const fn ellipse(width: u32, height: u32) -> Self {
        Self {
            shape: SelShape::Ellipse,
            width,
            height,
        }
    }

    /// Build the structuring element.
    pub fn build(&self) -> MorphResult<Sel> {
        Sel::from_shape(self.shape, self.width, self.height)
    }
}

/// Bounds of a 3×3 local-sum band selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefilterParams {
    pub min: u64,
    pub max: u64,
    pub invert: bool,
}

impl Default for RefilterParams {
    fn default() -> Self {
        Self {
            min: 0,
            max: 1,
            invert: false,
        }
    }
}

/// Distance-transform settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceParams {
    pub metric: DistanceMetric,
    /// Chamfer window size; results are identical for every size ≥ 3
    pub mask_size: u32,
}

impl Default for DistanceParams {
    fn default() -> Self {
        Self {
            metric: DistanceMetric::L1,
            mask_size: 10,
        }
    }
}

/// Missing-Hole recipe parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingHoleParams {
    /// Gaussian kernel size applied to the grayscale board
    pub blur_ksize: u32,
    /// First binarization level (`v > level` is board)
    pub board_level: u8,
    /// Closing element that seals small gaps in the board mask
    pub close_sel: SelParams,
    /// Second binarization level
    pub hole_level: u8,
    /// Polarity of the second binarization; inverted selects holes as
    /// foreground
    pub hole_kind: ThresholdKind,
    /// Exclusive lower area bound of a hole
    pub min_area: u32,
    /// Exclusive upper area bound of a hole
    pub max_area: u32,
    /// Gaussian kernel size applied to the hole mask before circle voting
    pub hough_blur_ksize: u32,
    pub hough: HoughParams,
    /// Minimum fill ratio (exclusive) of a validated circle
    pub fill_threshold: f64,
}

impl Default for MissingHoleParams {
    fn default() -> Self {
        Self {
            blur_ksize: 5,
            board_level: 40,
            close_sel: SelParams::ellipse(8, 8),
            hole_level: 128,
            hole_kind: ThresholdKind::BinaryInv,
            min_area: 200,
            max_area: 600,
            hough_blur_ksize: 5,
            hough: HoughParams::default(),
            fill_threshold: 0.4,
        }
    }
}

/// Mouse-Bite recipe parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseBiteParams {
    pub blur_ksize: u32,
    /// Inclusive lower RGB bound of copper
    pub copper_lower: Color,
    /// Inclusive upper RGB bound of copper
    pub copper_upper: Color,
    pub min_area: u32,
    pub max_area: u32,
    pub dilate_sel: SelParams,
    pub open_sel: SelParams,
    pub close_sel: SelParams,
    pub distance: DistanceParams,
    pub first_refilter: RefilterParams,
    pub second_dilate_sel: SelParams,
    pub second_open_sel: SelParams,
    pub second_refilter: RefilterParams,
    /// Radius of the circle drawn at each defect centroid
    pub highlight_radius: f64,
}

impl Default for MouseBiteParams {
    fn default() -> Self {
        Self {
            blur_ksize: 5,
            copper_lower: Color::new(0, 80, 0),
            copper_upper: Color::new(45, 100, 40),
            min_area: 125,
            max_area: 37500,
            dilate_sel: SelParams::rect(3, 3),
            open_sel: SelParams::rect(5, 5),
            close_sel: SelParams::ellipse(5, 5),
            distance: DistanceParams::default(),
            first_refilter: RefilterParams {
                min: 15,
                max: 30,
                invert: false,
            },
            second_dilate_sel: SelParams::ellipse(4, 4),
            second_open_sel: SelParams::ellipse(3, 3),
            second_refilter: RefilterParams {
                min: 34,
                max: 2295,
                invert: false,
            },
            highlight_radius: 15.0,
        }
    }
}

/// Reference-difference recipe parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifferenceParams {
    /// Absolute gray difference above which a pixel has changed
    pub threshold: u8,
    pub color: Color,
    pub thickness: u32,
}

impl Default for DifferenceParams {
    fn default() -> Self {
        Self {
            threshold: 30,
            color: Color::GREEN,
            thickness: 2,
        }
    }
}

/// Annotation style of the Missing-Hole and Mouse-Bite recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawParams {
    pub color: Color,
    pub thickness: u32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            color: Color::RED,
            thickness: 2,
        }
    }
}

/// All recipe parameters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParameters {
    pub missing_hole: MissingHoleParams,
    pub mouse_bite: MouseBiteParams,
    pub difference: DifferenceParams,
    pub draw: DrawParams,
}

fn invalid(msg: String) -> PipelineError {
    PipelineError::InvalidParameter(msg)
}

fn check_ksize(name: &str, k: u32) -> PipelineResult<()> {
    if k == 0 || k % 2 == 0 {
        return Err(invalid(format!("{} must be odd and >= 1, got {}", name, k)));
    }
    Ok(())
}

fn check_sel(name: &str, sel: &SelParams) -> PipelineResult<()> {
    if sel.width == 0 || sel.height == 0 {
        return Err(invalid(format!(
            "{} must be at least 1x1, got {}x{}",
            name, sel.width, sel.height
        )));
    }
    Ok(())
}

fn check_area(name: &str, min: u32, max: u32) -> PipelineResult<()> {
    if min >= max {
        return Err(invalid(format!(
            "{}: min_area ({}) must be less than max_area ({})",
            name, min, max
        )));
    }
    Ok(())
}

fn check_refilter(name: &str, r: &RefilterParams) -> PipelineResult<()> {
    if r.min >= r.max {
        return Err(invalid(format!(
            "{}: min ({}) must be less than max ({})",
            name, r.min, r.max
        )));
    }
    Ok(())
}

fn check_thickness(name: &str, t: u32) -> PipelineResult<()> {
    if t == 0 {
        return Err(invalid(format!("{} thickness must be >= 1", name)));
    }
    Ok(())
}

impl MissingHoleParams {
    pub fn validate(&self) -> PipelineResult<()> {
        check_ksize("missing_hole.blur_ksize", self.blur_ksize)?;
        check_ksize("missing_hole.hough_blur_ksize", self.hough_blur_ksize)?;
        check_sel("missing_hole.close_sel", &self.close_sel)?;
        check_area("missing_hole", self.min_area, self.max_area)?;
        self.hough
            .validate()
            .map_err(|e| invalid(format!("missing_hole.hough: {}", e)))?;
        if !(self.fill_threshold > 0.0 && self.fill_threshold < 1.0) {
            return Err(invalid(format!(
                "missing_hole.fill_threshold must lie in (0, 1), got {}",
                self.fill_threshold
            )));
        }
        Ok(())
    }
}

impl MouseBiteParams {
    pub fn validate(&self) -> PipelineResult<()> {
        check_ksize("mouse_bite.blur_ksize", self.blur_ksize)?;
        let lo = [self.copper_lower.r, self.copper_lower.g, self.copper_lower.b];
        let hi = [self.copper_upper.r, self.copper_upper.g, self.copper_upper.b];
        if lo.iter().zip(&hi).any(|(l, h)| l > h) {
            return Err(invalid(format!(
                "mouse_bite.copper_lower {:?} exceeds copper_upper {:?}",
                self.copper_lower, self.copper_upper
            )));
        }
        check_area("mouse_bite", self.min_area, self.max_area)?;
        check_sel("mouse_bite.dilate_sel", &self.dilate_sel)?;
        check_sel("mouse_bite.open_sel", &self.open_sel)?;
        check_sel("mouse_bite.close_sel", &self.close_sel)?;
        check_sel("mouse_bite.second_dilate_sel", &self.second_dilate_sel)?;
        check_sel("mouse_bite.second_open_sel", &self.second_open_sel)?;
        if self.distance.mask_size < 3 {
            return Err(invalid(format!(
                "mouse_bite.distance.mask_size must be >= 3, got {}",
                self.distance.mask_size
            )));
        }
        check_refilter("mouse_bite.first_refilter", &self.first_refilter)?;
        check_refilter("mouse_bite.second_refilter", &self.second_refilter)?;
        if !(self.highlight_radius > 0.0 && self.highlight_radius.is_finite()) {
            return Err(invalid(format!(
                "mouse_bite.highlight_radius must be positive, got {}",
                self.highlight_radius
            )));
        }
        Ok(())
    }
}

impl DifferenceParams {
    pub fn validate(&self) -> PipelineResult<()> {
        check_thickness("difference", self.thickness)
    }
}

impl DrawParams {
    pub fn validate(&self) -> PipelineResult<()> {
        check_thickness("draw", self.thickness)
    }
}

impl PipelineParameters {
    /// Validate every parameter group.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidParameter`] naming the first
    /// offending value.
    pub fn validate(&self) -> PipelineResult<()> {
        self.missing_hole.validate()?;
        self.mouse_bite.validate()?;
        self.difference.validate()?;
        self.draw.validate()
    }

    /// Load parameters from a JSON file; absent fields keep their
    /// defaults. The result is validated.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse parameters from JSON text; absent fields keep their defaults.
    /// The result is validated.
    pub fn from_json_str(text: &str) -> PipelineResult<Self> {
        let params: Self = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Pretty-printed JSON of every parameter.
    pub fn to_json_string(&self) -> PipelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        PipelineParameters::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_overrides() {
        let p = PipelineParameters::from_json_str(
            r#"{ "missing_hole": { "min_area": 150, "hole_kind": "binary" } }"#,
        )
        .unwrap();
        assert_eq!(p.missing_hole.min_area, 150);
        assert_eq!(p.missing_hole.max_area, 600);
        assert_eq!(p.missing_hole.hole_kind, ThresholdKind::Binary);
        assert_eq!(p.mouse_bite, MouseBiteParams::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let p = PipelineParameters::default();
        let text = p.to_json_string().unwrap();
        assert!(text.contains("\"fill_threshold\": 0.4"));
        assert_eq!(PipelineParameters::from_json_str(&text).unwrap(), p);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut p = PipelineParameters::default();
        p.missing_hole.min_area = 600;
        assert!(matches!(p.validate(), Err(PipelineError::InvalidParameter(_))));

        let mut p = PipelineParameters::default();
        p.missing_hole.fill_threshold = 1.0;
        assert!(p.validate().is_err());

        let mut p = PipelineParameters::default();
        p.mouse_bite.blur_ksize = 4;
        assert!(p.validate().is_err());

        let mut p = PipelineParameters::default();
        p.mouse_bite.second_refilter.min = 3000;
        assert!(p.validate().is_err());

        let mut p = PipelineParameters::default();
        p.mouse_bite.copper_lower = Color::new(50, 0, 0);
        assert!(p.validate().is_err());

        let mut p = PipelineParameters::default();
        p.draw.thickness = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_unknown_json_is_error() {
        assert!(PipelineParameters::from_json_str("{ not json").is_err());
    }
}
