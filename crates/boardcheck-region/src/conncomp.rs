//! Connected component analysis
//!
//! Two-pass labeling over a union-find forest. The first pass gives every
//! foreground pixel a provisional label and merges it with already-visited
//! neighbors; the second resolves each provisional label to its root and
//! renumbers roots `1..=K` in the raster order of their first pixel.
//! Statistics and centroids are accumulated in the second pass, so the
//! whole analysis is linear in the number of pixels.

use crate::error::{RegionResult, check_mask};
use boardcheck_core::{LabelMap, Raster, Rect};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Connectivity {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

/// Bounding box and pixel count of one component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentStats {
    /// Tight bounding box
    pub bounds: Rect,
    /// Number of pixels bearing the label
    pub area: u32,
}

/// Mean pixel coordinate of one component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

/// Result of connected component labeling
///
/// `stats[i]` and `centroids[i]` describe label `i + 1`; label 0 is
/// background and has no entry.
#[derive(Debug, Clone)]
pub struct ComponentLabeling {
    pub labels: LabelMap,
    pub stats: Vec<ComponentStats>,
    pub centroids: Vec<Centroid>,
}

impl ComponentLabeling {
    /// Number of foreground labels `K`.
    #[inline]
    pub fn num_labels(&self) -> usize {
        self.stats.len()
    }

    /// `(width, height)` of the label raster.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.labels.dimensions()
    }

    /// Statistics for `label`, or `None` for background and unknown ids.
    pub fn stats_for(&self, label: u32) -> Option<&ComponentStats> {
        label.checked_sub(1).and_then(|i| self.stats.get(i as usize))
    }

    /// Centroid for `label`, or `None` for background and unknown ids.
    pub fn centroid_for(&self, label: u32) -> Option<&Centroid> {
        label.checked_sub(1).and_then(|i| self.centroids.get(i as usize))
    }

    /// Iterate over `(label, stats, centroid)` for every component.
    pub fn components(&self) -> impl Iterator<Item = (u32, &ComponentStats, &Centroid)> + '_ {
        self.stats
            .iter()
            .zip(&self.centroids)
            .enumerate()
            .map(|(i, (s, c))| (i as u32 + 1, s, c))
    }
}

struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // Index 0 is reserved for background.
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi as usize] = lo;
        }
    }
}

#[derive(Clone, Copy)]
struct Accum {
    count: u32,
    sum_x: u64,
    sum_y: u64,
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl Accum {
    fn new(x: u32, y: u32) -> Self {
        Self {
            count: 0,
            sum_x: 0,
            sum_y: 0,
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn add(&mut self, x: u32, y: u32) {
        self.count += 1;
        self.sum_x += x as u64;
        self.sum_y += y as u64;
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

/// Label the foreground (non-zero) pixels of a 1-channel mask.
///
/// # Arguments
///
/// * `mask` - 1-channel raster; any non-zero sample is foreground
/// * `connectivity` - 4-way or 8-way adjacency
///
/// # Returns
///
/// A [`ComponentLabeling`]; an all-background mask yields zero labels.
pub fn label_components(mask: &Raster, connectivity: Connectivity) -> RegionResult<ComponentLabeling> {
    check_mask(mask)?;

    let w = mask.width();
    let h = mask.height();
    let src = mask.data();
    let mut labels = LabelMap::new(w, h)?;
    let mut uf = UnionFind::new();

    let neighbors: &[(i32, i32)] = match connectivity {
        Connectivity::FourWay => &[(-1, 0), (0, -1)],
        Connectivity::EightWay => &[(-1, 0), (-1, -1), (0, -1), (1, -1)],
    };

    {
        let lab = labels.data_mut();
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let i = (y as u32 * w + x as u32) as usize;
                if src[i] == 0 {
                    continue;
                }
                let mut current = 0u32;
                for &(dx, dy) in neighbors {
                    let nx = x + dx;
                    let ny = y + dy;
                    if nx < 0 || ny < 0 || nx >= w as i32 {
                        continue;
                    }
                    let n = lab[(ny as u32 * w + nx as u32) as usize];
                    if n == 0 {
                        continue;
                    }
                    if current == 0 {
                        current = n;
                    } else if current != n {
                        uf.union(current, n);
                    }
                }
                if current == 0 {
                    current = uf.make_set();
                }
                lab[i] = current;
            }
        }
    }

    let mut remap = vec![0u32; uf.parent.len()];
    let mut accums: Vec<Accum> = Vec::new();
    let lab = labels.data_mut();
    for y in 0..h {
        for x in 0..w {
            let i = (y * w + x) as usize;
            if lab[i] == 0 {
                continue;
            }
            let root = uf.find(lab[i]) as usize;
            if remap[root] == 0 {
                accums.push(Accum::new(x, y));
                remap[root] = accums.len() as u32;
            }
            let id = remap[root];
            lab[i] = id;
            accums[(id - 1) as usize].add(x, y);
        }
    }

    let stats = accums
        .iter()
        .map(|a| ComponentStats {
            bounds: Rect::new_unchecked(
                a.min_x as i32,
                a.min_y as i32,
                (a.max_x - a.min_x + 1) as i32,
                (a.max_y - a.min_y + 1) as i32,
            ),
            area: a.count,
        })
        .collect();
    let centroids = accums
        .iter()
        .map(|a| Centroid {
            x: a.sum_x as f64 / a.count as f64,
            y: a.sum_y as f64 / a.count as f64,
        })
        .collect();

    Ok(ComponentLabeling {
        labels,
        stats,
        centroids,
    })
}
