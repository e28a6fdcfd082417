//! Overlap scoring of detections against annotated boxes
//!
//! A circle hits a box when the circle's integer bounding square shares
//! at least one pixel with it.

use boardcheck_core::{Circle, Rect};
use std::ops::AddAssign;

/// Detection counts for one image or a set of images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Score {
    /// Circles hitting at least one box
    pub true_positives: usize,
    /// Circles hitting no box
    pub false_positives: usize,
    /// Boxes hit by at least one circle
    pub found: usize,
    /// Boxes hit by no circle
    pub missed: usize,
}

impl Score {
    pub fn detections(&self) -> usize {
        self.true_positives + self.false_positives
    }

    pub fn boxes(&self) -> usize {
        self.found + self.missed
    }

    /// Fraction of boxes found; 1 when there are no boxes.
    pub fn recall(&self) -> f64 {
        match self.boxes() {
            0 => 1.0,
            n => self.found as f64 / n as f64,
        }
    }

    /// Fraction of circles that hit a box; 1 when there are no circles.
    pub fn precision(&self) -> f64 {
        match self.detections() {
            0 => 1.0,
            n => self.true_positives as f64 / n as f64,
        }
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        self.true_positives += rhs.true_positives;
        self.false_positives += rhs.false_positives;
        self.found += rhs.found;
        self.missed += rhs.missed;
    }
}

impl std::iter::Sum for Score {
    fn sum<I: Iterator<Item = Score>>(iter: I) -> Score {
        iter.fold(Score::default(), |mut acc, s| {
            acc += s;
            acc
        })
    }
}

/// Score `circles` against the annotated `boxes` of one image.
pub fn score(circles: &[Circle], boxes: &[Rect]) -> Score {
    let mut hit_box = vec![false; boxes.len()];
    let mut result = Score::default();

    for circle in circles {
        let bounds = circle.bounding_rect();
        let mut hit = false;
        for (b, flag) in boxes.iter().zip(hit_box.iter_mut()) {
            if bounds.intersects(b) {
                hit = true;
                *flag = true;
            }
        }
        if hit {
            result.true_positives += 1;
        } else {
            result.false_positives += 1;
        }
    }

    result.found = hit_box.iter().filter(|&&h| h).count();
    result.missed = boxes.len() - result.found;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let boxes = [
            Rect::new_unchecked(0, 0, 10, 10),
            Rect::new_unchecked(50, 50, 10, 10),
            Rect::new_unchecked(100, 0, 5, 5),
        ];
        let circles = [
            Circle::new(5.0, 5.0, 3.0),
            Circle::new(12.0, 5.0, 3.0),
            Circle::new(80.0, 80.0, 4.0),
        ];
        let s = score(&circles, &boxes);
        assert_eq!(
            s,
            Score {
                true_positives: 2,
                false_positives: 1,
                found: 1,
                missed: 2
            }
        );
        assert!((s.recall() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(score(&[], &[]), Score::default());
        let s = score(&[], &[Rect::new_unchecked(0, 0, 2, 2)]);
        assert_eq!(s.missed, 1);
        assert_eq!(s.precision(), 1.0);
        assert_eq!(s.recall(), 0.0);
    }

    #[test]
    fn test_sum() {
        let a = Score {
            true_positives: 1,
            false_positives: 2,
            found: 1,
            missed: 0,
        };
        let total: Score = [a, a].into_iter().sum();
        assert_eq!(total.false_positives, 4);
        assert_eq!(total.boxes(), 2);
    }
}
