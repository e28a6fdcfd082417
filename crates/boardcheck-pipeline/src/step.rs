//! Typed snapshot passed between recipe stages
//!
//! A [`Step`] holds the current raster plus the side products computed
//! from exactly that raster: a component labeling and a distance field.
//! Every stage consumes the step and returns a new one. Stages that
//! replace the raster drop both side products, so a labeling can only be
//! used against the mask it was computed from:
//!
//! ```
//! # use boardcheck_core::{Channels, Raster};
//! # use boardcheck_pipeline::{PipelineResult, Step};
//! # fn run(mask: Raster) -> PipelineResult<()> {
//! let kept = Step::new(mask).label()?.area_filter(10, 100)?;
//! assert!(kept.labeling().is_none());
//! # Ok(())
//! # }
//! ```

use crate::params::{DistanceParams, RefilterParams, SelParams};
use crate::{PipelineError, PipelineResult};
use boardcheck_color::ThresholdKind;
use boardcheck_core::{Color, DistanceField, FOREGROUND, Raster};
use boardcheck_filter::{gaussian_blur, local_sum_refilter};
use boardcheck_morph::{BorderMode, MorphOp, morph};
use boardcheck_region::{
    Boundary, ComponentLabeling, Connectivity, distance_transform, fill_holes, filter_by_area,
    label_components,
};
use tracing::debug;

/// A raster and the artifacts derived from it
#[derive(Debug, Clone)]
#[must_use = "a step does nothing unless advanced or inspected"]
pub struct Step {
    raster: Raster,
    labeling: Option<ComponentLabeling>,
    distance: Option<DistanceField>,
}

impl Step {
    /// Start a chain from a raster with no derived artifacts.
    pub fn new(raster: Raster) -> Self {
        Self {
            raster,
            labeling: None,
            distance: None,
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Labeling of the current raster, if the last stage produced one.
    pub fn labeling(&self) -> Option<&ComponentLabeling> {
        self.labeling.as_ref()
    }

    /// Distance field of the current raster, if the last stage produced
    /// one.
    pub fn distance(&self) -> Option<&DistanceField> {
        self.distance.as_ref()
    }

    pub fn into_raster(self) -> Raster {
        self.raster
    }

    /// Labeling of the current raster, or [`PipelineError::MissingArtifact`]
    /// naming the stage that needed it.
    pub fn require_labeling(&self, stage: &'static str) -> PipelineResult<&ComponentLabeling> {
        self.labeling.as_ref().ok_or(PipelineError::MissingArtifact {
            stage,
            artifact: "component labeling",
        })
    }

    /// Distance field of the current raster, or
    /// [`PipelineError::MissingArtifact`].
    pub fn require_distance(&self, stage: &'static str) -> PipelineResult<&DistanceField> {
        self.distance.as_ref().ok_or(PipelineError::MissingArtifact {
            stage,
            artifact: "distance field",
        })
    }

    fn replaced(stage: &'static str, raster: Raster) -> Self {
        debug!(
            stage,
            width = raster.width(),
            height = raster.height(),
            foreground = raster.count_foreground(),
            "stage complete"
        );
        Self::new(raster)
    }

    /// Reduce to one channel.
    pub fn gray(self) -> Self {
        Self::replaced("gray", self.raster.to_gray())
    }

    /// Gaussian blur with a sigma derived from `ksize`.
    pub fn blur(self, ksize: u32) -> PipelineResult<Self> {
        let out = gaussian_blur(&self.raster, ksize, 0.0)?;
        Ok(Self::replaced("blur", out))
    }

    /// Binarize at `level` with output value 255.
    pub fn threshold(self, level: u8, kind: ThresholdKind) -> PipelineResult<Self> {
        let out = boardcheck_color::threshold(&self.raster, level, FOREGROUND, kind)?;
        Ok(Self::replaced("threshold", out))
    }

    /// Mask of pixels inside the inclusive color box.
    pub fn in_range(self, lower: Color, upper: Color) -> PipelineResult<Self> {
        let out = boardcheck_color::in_range(&self.raster, lower, upper)?;
        Ok(Self::replaced("in_range", out))
    }

    /// Apply a morphological operation with zero border.
    pub fn morph(self, op: MorphOp, sel: &SelParams) -> PipelineResult<Self> {
        let sel = sel.build()?;
        let out = morph(&self.raster, op, &sel, BorderMode::Constant(0))?;
        Ok(Self::replaced("morph", out))
    }

    /// Fill background regions enclosed by foreground.
    pub fn fill_holes(self) -> PipelineResult<Self> {
        let out = fill_holes(&self.raster)?;
        Ok(Self::replaced("fill_holes", out))
    }

    /// Label 8-connected components; the raster is kept.
    pub fn label(self) -> PipelineResult<Self> {
        let labeling = label_components(&self.raster, Connectivity::EightWay)?;
        debug!(stage = "label", components = labeling.num_labels(), "stage complete");
        Ok(Self {
            raster: self.raster,
            labeling: Some(labeling),
            distance: None,
        })
    }

    /// Keep components with `min_area < area < max_area`, using the
    /// labeling of the current raster.
    pub fn area_filter(self, min_area: u32, max_area: u32) -> PipelineResult<Self> {
        let labeling = self.require_labeling("area_filter")?;
        let out = filter_by_area(&self.raster, labeling, min_area, max_area)?;
        Ok(Self::replaced("area_filter", out))
    }

    /// Chamfer distance transform; the raster is kept.
    pub fn distance_transform(self, params: &DistanceParams) -> PipelineResult<Self> {
        let field = distance_transform(&self.raster, params.metric, Boundary::Foreground)?;
        debug!(
            stage = "distance",
            max_distance = field.max_distance(),
            "stage complete"
        );
        Ok(Self {
            raster: self.raster,
            labeling: None,
            distance: Some(field),
        })
    }

    /// Replace the raster with the 3×3 local-sum band of the current
    /// distance field.
    pub fn refilter(self, params: &RefilterParams) -> PipelineResult<Self> {
        let field = self.require_distance("refilter")?;
        let out = local_sum_refilter(field, params.min, params.max, params.invert)?;
        Ok(Self::replaced("refilter", out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardcheck_core::{Channels, Rect};

    fn two_blobs() -> Raster {
        let mut m = Raster::new(30, 30, Channels::Gray).unwrap();
        m.render_filled_rect_color(&Rect::new_unchecked(1, 1, 3, 3), Color::WHITE);
        m.render_filled_rect_color(&Rect::new_unchecked(10, 10, 10, 10), Color::WHITE);
        m
    }

    #[test]
    fn test_area_filter_requires_labeling() {
        let err = Step::new(two_blobs()).area_filter(5, 50).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingArtifact {
                stage: "area_filter",
                ..
            }
        ));
    }

    #[test]
    fn test_raster_change_drops_labeling() {
        let labeled = Step::new(two_blobs()).label().unwrap();
        assert_eq!(labeled.labeling().map(|l| l.num_labels()), Some(2));

        let dilated = labeled
            .morph(MorphOp::Dilate, &SelParams::rect(3, 3))
            .unwrap();
        assert!(dilated.labeling().is_none());
        assert!(dilated.area_filter(5, 50).is_err());
    }

    #[test]
    fn test_label_then_filter() {
        let kept = Step::new(two_blobs())
            .label()
            .unwrap()
            .area_filter(9, 101)
            .unwrap();
        assert_eq!(kept.raster().count_foreground(), 100);
    }

    #[test]
    fn test_refilter_requires_distance() {
        let err = Step::new(two_blobs())
            .refilter(&RefilterParams { min: 1, max: 5, invert: false })
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingArtifact { .. }));

        let step = Step::new(two_blobs())
            .distance_transform(&DistanceParams::default())
            .unwrap();
        assert_eq!(step.distance().map(|d| d.max_distance()), Some(5));
        let out = step
            .refilter(&RefilterParams { min: 0, max: 10, invert: false })
            .unwrap();
        assert!(out.distance().is_none());
        assert!(out.raster().is_binary());
    }
}
