//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Every element is either a hit or ignored; the origin sits at
//! `((width - 1) / 2, (height - 1) / 2)`, which for even sizes is the
//! upper-left of the two middle cells.

use crate::{MorphError, MorphResult};

/// Shape family of a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelShape {
    /// Every cell is a hit
    Rect,
    /// Cells inside the inscribed ellipse are hits
    Ellipse,
}

/// Structuring Element (SEL)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<bool>,
}

impl Sel {
    fn empty(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "structuring element must be at least 1x1, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            cx: (width - 1) / 2,
            cy: (height - 1) / 2,
            data: vec![false; (width * height) as usize],
        })
    }

    /// Create a rectangular structuring element with all hits
    pub fn rect(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::empty(width, height)?;
        sel.data.fill(true);
        Ok(sel)
    }

    /// Create an elliptical structuring element
    ///
    /// With semi-axes `a = width / 2` and `b = height / 2`, row `i` has
    /// `dy = i - b` and covers columns `[a - dx, a + dx]` clipped to the
    /// element, where `dx = round(a * sqrt(1 - dy² / b²))`.
    pub fn ellipse(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::empty(width, height)?;
        let a = (width / 2) as i64;
        let b = (height / 2) as i64;
        for i in 0..height as i64 {
            let dy = i - b;
            if dy.abs() > b {
                continue;
            }
            let dx = if b == 0 {
                a
            } else {
                let t = 1.0 - (dy * dy) as f64 / (b * b) as f64;
                (a as f64 * t.max(0.0).sqrt()).round() as i64
            };
            let x0 = (a - dx).max(0);
            let x1 = (a + dx + 1).min(width as i64);
            for x in x0..x1 {
                sel.data[(i * width as i64 + x) as usize] = true;
            }
        }
        Ok(sel)
    }

    /// Create a structuring element of the given shape family
    pub fn from_shape(shape: SelShape, width: u32, height: u32) -> MorphResult<Self> {
        match shape {
            SelShape::Rect => Self::rect(width, height),
            SelShape::Ellipse => Self::ellipse(width, height),
        }
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Whether (x, y) is a hit; `None` outside the element
    pub fn is_hit(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&h| h).count()
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, &hit)| {
                if hit {
                    let x = (idx as u32 % width) as i32;
                    let y = (idx as u32 / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(sel: &Sel) -> Vec<String> {
        (0..sel.height())
            .map(|y| {
                (0..sel.width())
                    .map(|x| if sel.is_hit(x, y) == Some(true) { 'x' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_rect_anchor() {
        let sel = Sel::rect(3, 3).unwrap();
        assert_eq!((sel.origin_x(), sel.origin_y()), (1, 1));
        assert_eq!(sel.hit_count(), 9);
        let sel = Sel::rect(8, 8).unwrap();
        assert_eq!((sel.origin_x(), sel.origin_y()), (3, 3));
    }

    #[test]
    fn test_ellipse_5x5() {
        let sel = Sel::ellipse(5, 5).unwrap();
        assert_eq!(
            rows(&sel),
            vec!["..x..", "xxxxx", "xxxxx", "xxxxx", "..x.."]
        );
    }

    #[test]
    fn test_ellipse_3x3_is_cross() {
        let sel = Sel::ellipse(3, 3).unwrap();
        assert_eq!(rows(&sel), vec![".x.", "xxx", ".x."]);
    }

    #[test]
    fn test_ellipse_even_size() {
        let sel = Sel::ellipse(4, 4).unwrap();
        assert_eq!(rows(&sel), vec!["..x.", "xxxx", "xxxx", "xxxx"]);
        assert_eq!((sel.origin_x(), sel.origin_y()), (1, 1));
    }

    #[test]
    fn test_offsets_relative_to_origin() {
        let sel = Sel::rect(2, 1).unwrap();
        let offs: Vec<_> = sel.hit_offsets().collect();
        assert_eq!(offs, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(Sel::rect(0, 3).is_err());
        assert!(Sel::ellipse(3, 0).is_err());
    }
}
