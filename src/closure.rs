//! Closed-loop detection from stroke endpoints.

use kurbo::Point;

/// Default endpoint gap, as a fraction of each axis' range.
pub const CLOSURE_TOLERANCE: f64 = 0.1;

/// Whether a stroke from `first` to `last` closes on itself.
///
/// Thresholds scale with the drawing surface half-extents, so the
/// decision does not depend on the surface's units.
pub fn is_closed(first: Point, last: Point, x_range: f64, y_range: f64) -> bool {
    is_closed_within(first, last, x_range, y_range, CLOSURE_TOLERANCE)
}

/// [`is_closed`] with an explicit tolerance fraction.
pub fn is_closed_within(
    first: Point,
    last: Point,
    x_range: f64,
    y_range: f64,
    tolerance: f64,
) -> bool {
    (first.x - last.x).abs() < tolerance * x_range
        && (first.y - last.y).abs() < tolerance * y_range
}
