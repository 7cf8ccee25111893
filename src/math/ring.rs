//! Cyclic vertex sequences.
//!
//! A ring lists the vertices of a closed boundary once each; the edge from
//! the last vertex back to the first is implied.

use super::{within_tolerance, Point2};

/// Finds the rotation offset `r` such that `a[i]` matches `b[(r + i) % n]`
/// for every `i`, trying offsets in ascending order.
///
/// Returns `None` if the rings differ in length, are empty, or no rotation
/// aligns them. Traversal direction is significant: a ring and its reverse
/// are not rotations of one another. Worst case is O(n²).
#[must_use]
pub fn rotation_offset(a: &[Point2], b: &[Point2], tolerance: f64) -> Option<usize> {
    let n = a.len();
    if n != b.len() {
        return None;
    }
    (0..n).find(|&start| {
        a.iter()
            .enumerate()
            .all(|(i, pa)| within_tolerance(pa, &b[(start + i) % n], tolerance))
    })
}

/// Returns `true` if `b` is a cyclic rotation of `a` within `tolerance`.
///
/// Mirrored rings (same vertices, opposite winding) compare unequal.
#[must_use]
pub fn rings_equal(a: &[Point2], b: &[Point2], tolerance: f64) -> bool {
    rotation_offset(a, b, tolerance).is_some()
}

/// Drops a trailing vertex that repeats the first one.
///
/// Drawing sources commonly close a polyline by repeating its start point;
/// stored rings hold every vertex exactly once.
#[must_use]
pub fn strip_closing_vertex(points: &[Point2], tolerance: f64) -> &[Point2] {
    match points {
        [first, .., last] if within_tolerance(first, last, tolerance) => {
            &points[..points.len() - 1]
        }
        _ => points,
    }
}
