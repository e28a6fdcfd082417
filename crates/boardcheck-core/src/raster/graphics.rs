//! Rendering of circles and rectangles onto rasters
//!
//! Shapes are rasterised to point lists first and then painted, clipping
//! every point against the raster bounds. Painting never fails because a
//! shape lies partly (or wholly) outside the image.

use super::Raster;
use crate::geometry::{Circle, Rect};

/// An RGB color used for annotation overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Generate the points of a circle outline of the given stroke width.
///
/// The stroke is centered on the nominal radius: a point belongs to it
/// when its distance from `(cx, cy)` lies in `[r - width/2, r + width/2]`.
/// A zero radius yields the center point only.
pub fn generate_circle_outline_points(cx: i32, cy: i32, radius: u32, width: u32) -> Vec<(i32, i32)> {
    if radius == 0 {
        return vec![(cx, cy)];
    }

    let width = width.max(1);
    let r_outer = radius as f32 + (width as f32 / 2.0);
    let r_inner = (radius as f32 - (width as f32 / 2.0)).max(0.0);
    let r_outer_sq = r_outer * r_outer;
    let r_inner_sq = r_inner * r_inner;

    let extent = (r_outer + 1.0) as i32;
    let mut points = Vec::with_capacity((8 * radius * width) as usize);

    for dy in -extent..=extent {
        for dx in -extent..=extent {
            let dist_sq = (dx * dx + dy * dy) as f32;
            if dist_sq <= r_outer_sq && dist_sq >= r_inner_sq {
                points.push((cx + dx, cy + dy));
            }
        }
    }

    points
}

/// Generate the points of a filled disk of the given radius.
///
/// A point belongs to the disk when its Euclidean distance from the
/// center is at most `radius`.
pub fn generate_filled_circle_points(cx: i32, cy: i32, radius: u32) -> Vec<(i32, i32)> {
    let r = radius as i32;
    let r_sq = (radius as i64) * (radius as i64);
    let mut points = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            if (dx as i64 * dx as i64 + dy as i64 * dy as i64) <= r_sq {
                points.push((cx + dx, cy + dy));
            }
        }
    }
    points
}

impl Raster {
    fn paint_points(&mut self, points: &[(i32, i32)], color: Color) {
        let (w, h) = self.dimensions();
        for &(x, y) in points {
            if x < 0 || y < 0 || x as u32 >= w || y as u32 >= h {
                continue;
            }
            self.set_rgb_unchecked(x as u32, y as u32, color.r, color.g, color.b);
        }
    }

    /// Render a circle outline centered at (cx, cy).
    pub fn render_circle_color(&mut self, cx: i32, cy: i32, radius: u32, width: u32, color: Color) {
        let points = generate_circle_outline_points(cx, cy, radius, width);
        self.paint_points(&points, color);
    }

    /// Render a filled disk centered at (cx, cy).
    pub fn render_filled_circle_color(&mut self, cx: i32, cy: i32, radius: u32, color: Color) {
        let points = generate_filled_circle_points(cx, cy, radius);
        self.paint_points(&points, color);
    }

    /// Render a filled axis-aligned rectangle, clipped to the raster.
    pub fn render_filled_rect_color(&mut self, rect: &Rect, color: Color) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width() as i32);
        let y1 = rect.bottom().min(self.height() as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_rgb_unchecked(x as u32, y as u32, color.r, color.g, color.b);
            }
        }
    }

    /// Draw the outline of every circle, in order.
    ///
    /// Centers and radii are rounded to the nearest integer; circles
    /// that extend past the raster are clipped.
    pub fn draw_circles(&mut self, circles: &[Circle], color: Color, thickness: u32) {
        for circle in circles {
            let cx = circle.cx.round() as i32;
            let cy = circle.cy.round() as i32;
            let radius = circle.radius.round().max(0.0) as u32;
            self.render_circle_color(cx, cy, radius, thickness, color);
        }
    }
}
