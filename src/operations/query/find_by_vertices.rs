use diesel::prelude::*;
use diesel::sql_types::BigInt;
use tracing::{debug, warn};

use super::GetVertices;
use crate::error::{ParcelisError, Result};
use crate::math::ring::rings_equal;
use crate::math::Point2;
use crate::model::PolygonId;
use crate::operations::polygon::MIN_VERTICES;
use crate::storage::rows::PolygonIdRow;
use crate::storage::Database;

const CANDIDATES_BY_VERTEX_COUNT: &str = r"
SELECT PolygonID AS polygon_id
FROM PolygonVertices
GROUP BY PolygonID
HAVING COUNT(*) = ?
ORDER BY PolygonID
";

/// Result of a duplicate-polygon lookup.
#[derive(Debug)]
pub enum MatchOutcome {
    /// A stored polygon has the same ring up to rotation.
    Found(PolygonId),
    /// The scan completed and nothing matched.
    NotFound,
    /// The scan could not complete; whether a duplicate exists is unknown.
    ScanFailed(ParcelisError),
}

impl MatchOutcome {
    /// The matching polygon, treating a failed scan as no match.
    #[must_use]
    pub fn polygon_id(&self) -> Option<PolygonId> {
        match self {
            Self::Found(id) => Some(*id),
            Self::NotFound | Self::ScanFailed(_) => None,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Converts into a result that keeps the scan failure as an error.
    ///
    /// # Errors
    ///
    /// Returns the cause of a [`MatchOutcome::ScanFailed`].
    pub fn into_result(self) -> Result<Option<PolygonId>> {
        match self {
            Self::Found(id) => Ok(Some(id)),
            Self::NotFound => Ok(None),
            Self::ScanFailed(err) => Err(err),
        }
    }
}

/// Finds a stored polygon whose ring equals the given vertices up to
/// rotation, within a per-axis tolerance.
///
/// Only polygons with the same vertex count are compared, in ascending id
/// order; the first match wins. Opposite winding never matches.
pub struct FindPolygonByVertices {
    vertices: Vec<Point2>,
    tolerance: f64,
}

impl FindPolygonByVertices {
    /// Creates a new `FindPolygonByVertices` query.
    #[must_use]
    pub fn new(vertices: Vec<Point2>, tolerance: f64) -> Self {
        Self {
            vertices,
            tolerance,
        }
    }

    /// Executes the query. Fewer than three vertices never match.
    #[must_use]
    pub fn execute(&self, db: &Database) -> MatchOutcome {
        if self.vertices.len() < MIN_VERTICES {
            return MatchOutcome::NotFound;
        }
        match db.read(|conn| self.scan(conn)) {
            Ok(Some(id)) => MatchOutcome::Found(id),
            Ok(None) => MatchOutcome::NotFound,
            Err(err) => {
                warn!(error = %err, "polygon match scan failed");
                MatchOutcome::ScanFailed(err)
            }
        }
    }

    fn scan(&self, conn: &mut SqliteConnection) -> Result<Option<PolygonId>> {
        let count = i64::try_from(self.vertices.len()).unwrap_or(i64::MAX);
        let candidates = diesel::sql_query(CANDIDATES_BY_VERTEX_COUNT)
            .bind::<BigInt, _>(count)
            .load::<PolygonIdRow>(conn)?;
        debug!(
            candidates = candidates.len(),
            vertices = self.vertices.len(),
            "scanning polygon candidates"
        );

        for row in candidates {
            let id = PolygonId(row.polygon_id);
            let stored = GetVertices::new(id).execute_in(conn)?;
            if rings_equal(&self.vertices, &stored, self.tolerance) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use crate::operations::polygon::InsertPolygon;
    use crate::test_support::{ring, temp_database};

    fn unit_square() -> Vec<Point2> {
        ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn finds_rotated_ring() {
        let (_dir, db) = temp_database();
        let id = InsertPolygon::new("square", unit_square())
            .execute(&db)
            .unwrap();

        let mut rotated = unit_square();
        for _ in 0..4 {
            rotated.rotate_left(1);
            let outcome = FindPolygonByVertices::new(rotated.clone(), TOLERANCE).execute(&db);
            assert_eq!(outcome.polygon_id(), Some(id));
        }
    }

    #[test]
    fn reversed_ring_is_not_found() {
        let (_dir, db) = temp_database();
        InsertPolygon::new("square", unit_square())
            .execute(&db)
            .unwrap();

        let reversed = ring(&[(0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        let outcome = FindPolygonByVertices::new(reversed, TOLERANCE).execute(&db);
        assert!(matches!(outcome, MatchOutcome::NotFound));
    }

    #[test]
    fn too_few_vertices_never_match() {
        let (_dir, db) = temp_database();
        let outcome =
            FindPolygonByVertices::new(ring(&[(0.0, 0.0), (1.0, 0.0)]), TOLERANCE).execute(&db);
        assert!(matches!(outcome, MatchOutcome::NotFound));
    }

    #[test]
    fn only_same_vertex_count_is_compared() {
        let (_dir, db) = temp_database();
        InsertPolygon::new("triangle", ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]))
            .execute(&db)
            .unwrap();
        let outcome = FindPolygonByVertices::new(unit_square(), TOLERANCE).execute(&db);
        assert!(matches!(outcome, MatchOutcome::NotFound));
    }

    #[test]
    fn picks_the_matching_candidate() {
        let (_dir, db) = temp_database();
        InsertPolygon::new("far", ring(&[(50.0, 50.0), (51.0, 50.0), (51.0, 51.0), (50.0, 51.0)]))
            .execute(&db)
            .unwrap();
        let near = InsertPolygon::new("near", unit_square())
            .execute(&db)
            .unwrap();

        let jittered = ring(&[(1.000_05, 1.0), (0.0, 0.999_95), (0.0, 0.0), (1.0, 0.0)]);
        let outcome = FindPolygonByVertices::new(jittered, TOLERANCE).execute(&db);
        assert_eq!(outcome.into_result().unwrap(), Some(near));
    }

    #[test]
    fn storage_fault_is_reported_as_scan_failure() {
        let (_dir, db) = temp_database();
        InsertPolygon::new("square", unit_square())
            .execute(&db)
            .unwrap();
        db.write("drop links", |conn| {
            diesel::sql_query("DROP TABLE PolygonVertices").execute(conn)?;
            Ok(())
        })
        .unwrap();

        let outcome = FindPolygonByVertices::new(unit_square(), TOLERANCE).execute(&db);
        assert!(matches!(outcome, MatchOutcome::ScanFailed(_)));
        assert_eq!(outcome.polygon_id(), None);
        assert!(outcome.into_result().is_err());
    }
}
