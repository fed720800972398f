use crate::models::Point;

/// Returns true if two axis-aligned rectangles, given by center and full
/// extents, overlap.
///
/// Intervals are closed: rectangles that merely touch along an edge or a
/// corner overlap. Any NaN coordinate or extent never overlaps anything.
///
/// # Examples
///
/// ```
/// use rs_quadtree::models::{Point, rectangles_overlap};
///
/// let cell = Point::new(1000.0, 1000.0);
/// assert!(rectangles_overlap(&Point::new(500.0, 500.0), 100.0, 100.0, &cell, 2000.0, 2000.0));
/// assert!(!rectangles_overlap(&Point::new(10000.0, 10000.0), 100.0, 100.0, &cell, 2000.0, 2000.0));
/// ```
pub fn rectangles_overlap(
    center: &Point,
    width: f64,
    height: f64,
    other_center: &Point,
    other_width: f64,
    other_height: f64,
) -> bool {
    other_center.x - other_width / 2.0 <= center.x + width / 2.0
        && center.x - width / 2.0 <= other_center.x + other_width / 2.0
        && other_center.y - other_height / 2.0 <= center.y + height / 2.0
        && center.y - height / 2.0 <= other_center.y + other_height / 2.0
}

/// Returns true if `point` lies inside the closed rectangle.
pub fn point_in_rectangle(point: &Point, center: &Point, width: f64, height: f64) -> bool {
    rectangles_overlap(point, 0.0, 0.0, center, width, height)
}

/// Returns true if `point` lies inside the closed disc.
pub fn point_in_circle(point: &Point, center: &Point, radius: f64) -> bool {
    point.distance_squared(center) <= radius * radius
}
