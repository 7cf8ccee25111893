use diesel::prelude::*;

use crate::error::Result;
use crate::math::Point2;
use crate::model::PolygonId;
use crate::storage::schema::{coordinates, polygon_vertices};
use crate::storage::Database;

/// Fetches a polygon's ring in stored vertex order.
///
/// An unknown polygon and a polygon without links both yield an empty ring.
pub struct GetVertices {
    polygon: PolygonId,
}

impl GetVertices {
    /// Creates a new `GetVertices` query.
    #[must_use]
    pub fn new(polygon: PolygonId) -> Self {
        Self { polygon }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    pub fn execute(&self, db: &Database) -> Result<Vec<Point2>> {
        db.read(|conn| self.execute_in(conn))
    }

    pub(crate) fn execute_in(&self, conn: &mut SqliteConnection) -> Result<Vec<Point2>> {
        let rows = polygon_vertices::table
            .inner_join(coordinates::table)
            .filter(polygon_vertices::polygon_id.eq(self.polygon.0))
            .order(polygon_vertices::vertex_order.asc())
            .select((coordinates::x, coordinates::y))
            .load::<(f64, f64)>(conn)?;
        Ok(rows.into_iter().map(|(x, y)| Point2::new(x, y)).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::polygon::InsertPolygon;
    use crate::test_support::{ring, temp_database};

    #[test]
    fn unknown_polygon_has_no_vertices() {
        let (_dir, db) = temp_database();
        assert!(GetVertices::new(PolygonId(1)).execute(&db).unwrap().is_empty());
    }

    #[test]
    fn returns_insertion_order_not_id_order() {
        let (_dir, db) = temp_database();
        // Seed the pool so the ring's points are not in ascending id order.
        InsertPolygon::new("seed", ring(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0)]))
            .execute(&db)
            .unwrap();
        let shape = ring(&[(0.0, 0.0), (6.0, 6.0), (5.0, 5.0), (6.0, 5.0)]);
        let id = InsertPolygon::new("reuse", shape.clone())
            .execute(&db)
            .unwrap();

        let vertices = GetVertices::new(id).execute(&db).unwrap();
        assert_eq!(vertices.len(), shape.len());
        for (got, want) in vertices.iter().zip(&shape) {
            approx::assert_abs_diff_eq!(got.x, want.x);
            approx::assert_abs_diff_eq!(got.y, want.y);
        }
    }
}
