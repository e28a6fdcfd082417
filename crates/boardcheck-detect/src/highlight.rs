//! Circles that mark labeled regions for annotation

use boardcheck_core::Circle;
use boardcheck_region::ComponentLabeling;

/// One circle of fixed `radius` at the centroid of every component, in
/// label order.
pub fn centroid_circles(labeling: &ComponentLabeling, radius: f64) -> Vec<Circle> {
    labeling
        .centroids
        .iter()
        .map(|c| Circle::new(c.x, c.y, radius))
        .collect()
}

/// One circle per component enclosing its bounding box, in label order.
///
/// The center is `(x + w/2, y + h/2)` and the radius `max(w, h)/2`, both
/// with integer division.
pub fn bounding_box_circles(labeling: &ComponentLabeling) -> Vec<Circle> {
    labeling
        .stats
        .iter()
        .map(|s| {
            let b = s.bounds;
            Circle::new(
                b.center_x() as f64,
                b.center_y() as f64,
                (b.w.max(b.h) / 2) as f64,
            )
        })
        .collect()
}
