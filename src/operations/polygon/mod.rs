mod insert;
mod rename;

pub use insert::InsertPolygon;
pub use rename::RenamePolygon;

use crate::error::ValidationError;
use crate::math::Point2;

/// Fewest vertices a polygon ring may have.
pub const MIN_VERTICES: usize = 3;

/// Checks a ring before it is written: at least [`MIN_VERTICES`] vertices,
/// each with finite coordinates, and few enough to index with an `i32`.
pub(crate) fn validate_ring(vertices: &[Point2]) -> Result<(), ValidationError> {
    if vertices.len() < MIN_VERTICES {
        return Err(ValidationError::TooFewVertices {
            count: vertices.len(),
            min: MIN_VERTICES,
        });
    }
    if i32::try_from(vertices.len()).is_err() {
        return Err(ValidationError::TooManyVertices {
            count: vertices.len(),
        });
    }
    if let Some(index) = vertices
        .iter()
        .position(|v| !(v.x.is_finite() && v.y.is_finite()))
    {
        return Err(ValidationError::NonFiniteVertex { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_enough() {
        let tri = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        assert_eq!(validate_ring(&tri), Ok(()));
    }

    #[test]
    fn two_vertices_are_rejected() {
        let seg = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert_eq!(
            validate_ring(&seg),
            Err(ValidationError::TooFewVertices { count: 2, min: 3 })
        );
    }

    #[test]
    fn non_finite_vertex_is_located() {
        let ring = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, f64::INFINITY),
        ];
        assert_eq!(
            validate_ring(&ring),
            Err(ValidationError::NonFiniteVertex { index: 2 })
        );
    }
}
