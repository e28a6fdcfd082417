//! Rect and Circle - geometric primitives in raster coordinates
//!
//! Both are small `Copy` types. `Rect` uses integer pixel coordinates with
//! an exclusive right/bottom edge; `Circle` uses fractional coordinates
//! because detectors refine centers below pixel resolution.

use crate::error::{Error, Result};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "rect dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a rectangle without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle from inclusive corner coordinates, as used by
    /// annotation formats (`xmin..=xmax`, `ymin..=ymax`).
    pub fn from_inclusive_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (xmin, xmax) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (ymin, ymax) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self {
            x: xmin,
            y: ymin,
            w: xmax - xmin + 1,
            h: ymax - ymin + 1,
        }
    }

    /// Right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Center x coordinate (integer division)
    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Center y coordinate (integer division)
    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check whether the point lies inside the rectangle.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check whether two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Intersection of two rectangles, or `None` if they are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        Some(Rect::new_unchecked(x, y, r - x, b - y))
    }
}

/// A circle in raster coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    /// Center x coordinate
    pub cx: f64,
    /// Center y coordinate
    pub cy: f64,
    /// Radius in pixels
    pub radius: f64,
}

impl Circle {
    pub const fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self { cx, cy, radius }
    }

    /// Analytic area `π·r²`.
    #[inline]
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// True when the Euclidean distance from (x, y) to the center is at
    /// most the radius.
    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Smallest integer rectangle covering the circle's bounding square.
    pub fn bounding_rect(&self) -> Rect {
        let x0 = (self.cx - self.radius).floor() as i32;
        let y0 = (self.cy - self.radius).floor() as i32;
        let x1 = (self.cx + self.radius).ceil() as i32;
        let y1 = (self.cy + self.radius).ceil() as i32;
        Rect::new_unchecked(x0, y0, x1 - x0 + 1, y1 - y0 + 1)
    }

    /// Euclidean distance between two centers.
    #[inline]
    pub fn center_distance(&self, other: &Circle) -> f64 {
        (self.cx - other.cx).hypot(self.cy - other.cy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new_unchecked(0, 0, 10, 10);
        let b = Rect::new_unchecked(5, 5, 10, 10);
        let c = Rect::new_unchecked(10, 0, 3, 3);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert_eq!(a.intersection(&b), Some(Rect::new_unchecked(5, 5, 5, 5)));
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_rect_from_inclusive_corners() {
        let r = Rect::from_inclusive_corners(10, 20, 12, 25);
        assert_eq!(r, Rect::new_unchecked(10, 20, 3, 6));
        assert!(r.contains_point(12, 25));
        assert!(!r.contains_point(13, 25));
    }

    #[test]
    fn test_negative_rect_rejected() {
        assert!(Rect::new(0, 0, -1, 3).is_err());
    }

    #[test]
    fn test_circle_bounds_and_membership() {
        let c = Circle::new(5.0, 5.0, 2.0);
        assert_eq!(c.bounding_rect(), Rect::new_unchecked(3, 3, 5, 5));
        assert!(c.contains_point(7.0, 5.0));
        assert!(!c.contains_point(7.0, 6.0));
        assert!((c.area() - 4.0 * std::f64::consts::PI).abs() < 1e-12);
    }
}
