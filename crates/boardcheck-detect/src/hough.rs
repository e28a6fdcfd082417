//! Gradient Hough circle detector
//!
//! Every edge pixel (Sobel magnitude at or above a threshold) votes, for
//! each candidate radius `r`, at the two points `p ± r·ĝ` along its unit
//! gradient. Votes land in cells of `resolution` × `resolution` pixels,
//! one layer per radius.
//!
//! Layers are processed one at a time; each center cell keeps its
//! radius-summed count, its best single-radius count, and the radius that
//! produced it. A cell is a candidate when its summed count is a local
//! maximum over its 8 neighbours and its best count exceeds the
//! accumulator threshold. Candidates are refined with a second pass that
//! averages the exact vote positions and radii within two radius steps of
//! the best one.
//!
//! No sampling is involved, so identical input gives identical output.

use crate::{DetectError, DetectResult};
use boardcheck_core::{Channels, Circle, Raster};
use boardcheck_filter::{Gradient, sobel_gradient};

/// Half-width of the radius window used for refinement.
const REFINE_RADIUS_WINDOW: u32 = 2;

/// Hough circle detector parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HoughParams {
    /// Minimum Sobel gradient magnitude of an edge pixel
    pub edge_threshold: f64,
    /// A reported circle's best single-radius vote count is strictly
    /// greater than this
    pub accumulator_threshold: u32,
    /// Size in pixels of one accumulator cell (≥ 1)
    pub resolution: u32,
    /// Minimum distance between reported centers
    pub min_center_distance: f64,
    /// Smallest radius searched (0 is treated as 1)
    pub min_radius: u32,
    /// Largest radius searched; 0 derives it from the raster diagonal
    pub max_radius: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            edge_threshold: 255.0,
            accumulator_threshold: 50,
            resolution: 5,
            min_center_distance: 1.0,
            min_radius: 0,
            max_radius: 20,
        }
    }
}

impl HoughParams {
    /// Check parameter consistency.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidParameters`] for a zero resolution, a
    /// negative or non-finite threshold or distance, or `min_radius >
    /// max_radius` with a non-zero `max_radius`.
    pub fn validate(&self) -> DetectResult<()> {
        if self.resolution == 0 {
            return Err(DetectError::InvalidParameters(
                "accumulator resolution must be >= 1".to_string(),
            ));
        }
        if !self.edge_threshold.is_finite() || self.edge_threshold < 0.0 {
            return Err(DetectError::InvalidParameters(format!(
                "edge threshold must be a non-negative number, got {}",
                self.edge_threshold
            )));
        }
        if !self.min_center_distance.is_finite() || self.min_center_distance < 0.0 {
            return Err(DetectError::InvalidParameters(format!(
                "minimum center distance must be a non-negative number, got {}",
                self.min_center_distance
            )));
        }
        if self.max_radius != 0 && self.min_radius > self.max_radius {
            return Err(DetectError::InvalidParameters(format!(
                "min radius {} exceeds max radius {}",
                self.min_radius, self.max_radius
            )));
        }
        Ok(())
    }

    /// Inclusive radius range searched on a `width` × `height` raster.
    pub fn radius_range(&self, width: u32, height: u32) -> (u32, u32) {
        let rmin = self.min_radius.max(1);
        let rmax = if self.max_radius == 0 {
            (width as f64).hypot(height as f64).ceil() as u32
        } else {
            self.max_radius
        };
        (rmin, rmax)
    }
}

/// A detected circle with its accumulator strength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCircle {
    pub circle: Circle,
    /// Best single-radius vote count of the center cell
    pub strength: u32,
}

struct EdgeVote {
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
}

struct Accumulator {
    cols: usize,
    rows: usize,
    res: f64,
    width: f64,
    height: f64,
}

impl Accumulator {
    fn new(width: u32, height: u32, resolution: u32) -> Self {
        let res = resolution as f64;
        Self {
            cols: ((width - 1) as f64 / res).round() as usize + 1,
            rows: ((height - 1) as f64 / res).round() as usize + 1,
            res,
            width: width as f64,
            height: height as f64,
        }
    }

    /// Cell index of a vote at (vx, vy), or `None` when the vote falls
    /// outside the raster.
    #[inline]
    fn cell(&self, vx: f64, vy: f64) -> Option<usize> {
        let px = vx.round();
        let py = vy.round();
        if px < 0.0 || py < 0.0 || px >= self.width || py >= self.height {
            return None;
        }
        let cx = (vx / self.res).round() as usize;
        let cy = (vy / self.res).round() as usize;
        if cx >= self.cols || cy >= self.rows {
            return None;
        }
        Some(cy * self.cols + cx)
    }

    /// Both vote positions of `e` at radius `r`.
    #[inline]
    fn votes(e: &EdgeVote, r: f64) -> [(f64, f64); 2] {
        [(e.x + r * e.dx, e.y + r * e.dy), (e.x - r * e.dx, e.y - r * e.dy)]
    }
}

fn collect_edges(gradient: &Gradient, threshold: f64) -> Vec<EdgeVote> {
    gradient
        .edge_points(threshold)
        .into_iter()
        .filter_map(|(x, y)| {
            gradient.direction(x, y).map(|(dx, dy)| EdgeVote {
                x: x as f64,
                y: y as f64,
                dx,
                dy,
            })
        })
        .collect()
}

/// Local maximum test on radius-summed counts: strictly greater than the
/// neighbours before `idx` in scan order, at least equal to those after.
fn is_local_max(total: &[u64], cols: usize, rows: usize, idx: usize) -> bool {
    let v = total[idx];
    if v == 0 {
        return false;
    }
    let cx = (idx % cols) as isize;
    let cy = (idx / cols) as isize;
    for ny in cy - 1..=cy + 1 {
        for nx in cx - 1..=cx + 1 {
            if (nx, ny) == (cx, cy) || nx < 0 || ny < 0 || nx >= cols as isize || ny >= rows as isize {
                continue;
            }
            let n = (ny as usize) * cols + nx as usize;
            if (n < idx && total[n] >= v) || (n > idx && total[n] > v) {
                return false;
            }
        }
    }
    true
}

/// Detect circles and report their accumulator strengths.
///
/// See [`detect_circles`].
pub fn detect_circles_scored(raster: &Raster, params: &HoughParams) -> DetectResult<Vec<ScoredCircle>> {
    params.validate()?;
    let gray;
    let raster = match raster.channels() {
        Channels::Gray => raster,
        Channels::Rgb => {
            gray = raster.to_gray();
            &gray
        }
    };

    let (width, height) = raster.dimensions();
    let (rmin, rmax) = params.radius_range(width, height);
    if rmin > rmax {
        return Ok(Vec::new());
    }

    let gradient = sobel_gradient(raster)?;
    let edges = collect_edges(&gradient, params.edge_threshold);
    let acc = Accumulator::new(width, height, params.resolution);
    let ncells = acc.cols * acc.rows;

    let mut total = vec![0u64; ncells];
    let mut best = vec![0u32; ncells];
    let mut best_r = vec![0u32; ncells];
    let mut layer = vec![0u32; ncells];

    for r in rmin..=rmax {
        layer.fill(0);
        for e in &edges {
            for (vx, vy) in Accumulator::votes(e, r as f64) {
                if let Some(c) = acc.cell(vx, vy) {
                    layer[c] += 1;
                }
            }
        }
        for (c, &n) in layer.iter().enumerate() {
            total[c] += n as u64;
            if n > best[c] {
                best[c] = n;
                best_r[c] = r;
            }
        }
    }

    let mut candidates: Vec<usize> = (0..ncells)
        .filter(|&c| best[c] > params.accumulator_threshold)
        .filter(|&c| is_local_max(&total, acc.cols, acc.rows, c))
        .collect();
    candidates.sort_by(|&a, &b| best[b].cmp(&best[a]).then(a.cmp(&b)));

    let mut accepted: Vec<ScoredCircle> = Vec::new();
    for c in candidates {
        let lo = best_r[c].saturating_sub(REFINE_RADIUS_WINDOW).max(rmin);
        let hi = (best_r[c] + REFINE_RADIUS_WINDOW).min(rmax);
        let (mut sx, mut sy, mut sr, mut n) = (0.0, 0.0, 0.0, 0u64);
        for r in lo..=hi {
            for e in &edges {
                for (vx, vy) in Accumulator::votes(e, r as f64) {
                    if acc.cell(vx, vy) == Some(c) {
                        sx += vx;
                        sy += vy;
                        sr += r as f64;
                        n += 1;
                    }
                }
            }
        }
        if n == 0 {
            continue;
        }
        let circle = Circle::new(sx / n as f64, sy / n as f64, sr / n as f64);
        if accepted
            .iter()
            .any(|a| a.circle.center_distance(&circle) < params.min_center_distance)
        {
            continue;
        }
        accepted.push(ScoredCircle {
            circle,
            strength: best[c],
        });
    }

    tracing::debug!(
        edges = edges.len(),
        radii = rmax - rmin + 1,
        circles = accepted.len(),
        "hough circle detection"
    );
    Ok(accepted)
}

/// Detect circles in a raster.
///
/// Color input is reduced to luminance first. Circles come back ordered
/// by descending accumulator strength, ties broken by the raster scan
/// order of their accumulator cell.
///
/// # Errors
///
/// Returns [`DetectError::InvalidParameters`] if `params` fails
/// [`HoughParams::validate`].
pub fn detect_circles(raster: &Raster, params: &HoughParams) -> DetectResult<Vec<Circle>> {
    Ok(detect_circles_scored(raster, params)?
        .into_iter()
        .map(|s| s.circle)
        .collect())
}
