pub mod ring;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// Per-axis tolerance under which two coordinates denote the same location.
pub const TOLERANCE: f64 = 1e-4;

/// Returns `true` if `a` and `b` lie strictly inside each other's tolerance
/// window on both axes.
///
/// A difference of exactly `tolerance` does not match.
#[must_use]
pub fn within_tolerance(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    (a.x - b.x).abs() < tolerance && (a.y - b.y).abs() < tolerance
}
