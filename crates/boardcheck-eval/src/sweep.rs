//! Grid search over recipe parameters
//!
//! Every combination of a [`SweepGrid`] is applied to a copy of a base
//! parameter set and run over all samples. Combinations run in parallel;
//! the ranking is deterministic.

use crate::score::{Score, score};
use crate::{EvalError, EvalResult};
use boardcheck_core::{Raster, Rect};
use boardcheck_pipeline::{PipelineParameters, Recipe};
use rayon::prelude::*;
use tracing::{debug, info};

/// An image with its annotated defect boxes
#[derive(Debug, Clone)]
pub struct Sample {
    pub name: String,
    pub image: Raster,
    pub boxes: Vec<Rect>,
}

/// Values to try for each swept parameter
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SweepGrid {
    pub min_areas: Vec<u32>,
    pub max_areas: Vec<u32>,
    /// Only used by the Missing-Hole recipe
    pub fill_thresholds: Vec<f64>,
}

impl Default for SweepGrid {
    fn default() -> Self {
        Self {
            min_areas: vec![100, 150, 200, 250],
            max_areas: vec![400, 600, 800, 1000],
            fill_thresholds: vec![0.3, 0.4, 0.5, 0.6],
        }
    }
}

/// One evaluated combination
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SweepResult {
    pub min_area: u32,
    pub max_area: u32,
    /// `None` for recipes without a fill-ratio stage
    pub fill_threshold: Option<f64>,
    pub score: Score,
}

impl SweepGrid {
    /// Parameter sets for every valid combination, in grid order.
    ///
    /// Combinations with `min_area >= max_area` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::InvalidGrid`] if an axis the recipe uses is
    /// empty or no combination is valid.
    pub fn combinations(
        &self,
        recipe: Recipe,
        base: &PipelineParameters,
    ) -> EvalResult<Vec<(PipelineParameters, SweepResult)>> {
        if self.min_areas.is_empty() || self.max_areas.is_empty() {
            return Err(EvalError::InvalidGrid("area axes must not be empty".into()));
        }
        let fills: Vec<Option<f64>> = match recipe {
            Recipe::MissingHole if self.fill_thresholds.is_empty() => {
                return Err(EvalError::InvalidGrid("fill_thresholds must not be empty".into()));
            }
            Recipe::MissingHole => self.fill_thresholds.iter().copied().map(Some).collect(),
            Recipe::MouseBite => vec![None],
        };

        let mut out = Vec::new();
        for &min_area in &self.min_areas {
            for &max_area in &self.max_areas {
                if min_area >= max_area {
                    continue;
                }
                for &fill in &fills {
                    let mut params = *base;
                    match recipe {
                        Recipe::MissingHole => {
                            params.missing_hole.min_area = min_area;
                            params.missing_hole.max_area = max_area;
                            if let Some(f) = fill {
                                params.missing_hole.fill_threshold = f;
                            }
                        }
                        Recipe::MouseBite => {
                            params.mouse_bite.min_area = min_area;
                            params.mouse_bite.max_area = max_area;
                        }
                    }
                    params.validate()?;
                    out.push((
                        params,
                        SweepResult {
                            min_area,
                            max_area,
                            fill_threshold: fill,
                            score: Score::default(),
                        },
                    ));
                }
            }
        }

        if out.is_empty() {
            return Err(EvalError::InvalidGrid(
                "no combination satisfies min_area < max_area".into(),
            ));
        }
        Ok(out)
    }
}

/// Run `recipe` with `params` on every sample and sum the scores.
pub fn evaluate(recipe: Recipe, samples: &[Sample], params: &PipelineParameters) -> EvalResult<Score> {
    let mut total = Score::default();
    for sample in samples {
        let detection = recipe.run(&sample.image, params)?;
        let s = score(&detection.circles, &sample.boxes);
        debug!(sample = %sample.name, ?s, "scored");
        total += s;
    }
    Ok(total)
}

/// Evaluate every grid combination and rank the results by boxes found
/// (descending), then false positives (ascending). Ties keep grid order.
pub fn sweep(
    recipe: Recipe,
    samples: &[Sample],
    base: &PipelineParameters,
    grid: &SweepGrid,
) -> EvalResult<Vec<SweepResult>> {
    let combos = grid.combinations(recipe, base)?;
    info!(
        recipe = recipe.name(),
        combinations = combos.len(),
        samples = samples.len(),
        "starting sweep"
    );

    let mut results = combos
        .into_par_iter()
        .map(|(params, mut result)| {
            result.score = evaluate(recipe, samples, &params)?;
            Ok(result)
        })
        .collect::<EvalResult<Vec<_>>>()?;

    results.sort_by(|a, b| {
        b.score
            .found
            .cmp(&a.score.found)
            .then(a.score.false_positives.cmp(&b.score.false_positives))
    });
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combinations_skip_inverted_bounds() {
        let grid = SweepGrid {
            min_areas: vec![100, 500],
            max_areas: vec![400, 600],
            fill_thresholds: vec![0.4, 0.5],
        };
        let combos = grid
            .combinations(Recipe::MissingHole, &PipelineParameters::default())
            .unwrap();
        // (100,400) (100,600) (500,600), two fills each
        assert_eq!(combos.len(), 6);
        assert_eq!(combos[0].0.missing_hole.min_area, 100);
        assert_eq!(combos[0].0.missing_hole.max_area, 400);
        assert_eq!(combos[1].1.fill_threshold, Some(0.5));

        let mb = grid
            .combinations(Recipe::MouseBite, &PipelineParameters::default())
            .unwrap();
        assert_eq!(mb.len(), 3);
        assert_eq!(mb[2].0.mouse_bite.min_area, 500);
        assert!(mb.iter().all(|(_, r)| r.fill_threshold.is_none()));
    }

    #[test]
    fn test_empty_grid_is_error() {
        let grid = SweepGrid {
            min_areas: vec![500],
            max_areas: vec![400],
            fill_thresholds: vec![0.4],
        };
        assert!(matches!(
            grid.combinations(Recipe::MissingHole, &PipelineParameters::default()),
            Err(EvalError::InvalidGrid(_))
        ));
        let grid = SweepGrid {
            fill_thresholds: vec![],
            ..SweepGrid::default()
        };
        assert!(grid
            .combinations(Recipe::MissingHole, &PipelineParameters::default())
            .is_err());
    }

    #[test]
    fn test_out_of_range_fill_is_pipeline_error() {
        let grid = SweepGrid {
            fill_thresholds: vec![1.5],
            ..SweepGrid::default()
        };
        assert!(matches!(
            grid.combinations(Recipe::MissingHole, &PipelineParameters::default()),
            Err(EvalError::Pipeline(_))
        ));
    }
}
