use diesel::prelude::*;

use crate::error::Result;
use crate::model::PolygonSummary;
use crate::storage::rows::PolygonSummaryRow;
use crate::storage::Database;

const LIST_POLYGONS: &str = r"
SELECT p.PolygonID AS polygon_id,
       p.PolygonName AS polygon_name,
       p.Description AS description,
       p.CreatedAt AS created_at,
       p.LastModified AS last_modified,
       COUNT(pv.PointID) AS vertex_count
FROM Polygons p
LEFT JOIN PolygonVertices pv ON pv.PolygonID = p.PolygonID
GROUP BY p.PolygonID
ORDER BY p.CreatedAt DESC, p.PolygonID DESC
";

/// Lists every polygon with its vertex count, newest first.
///
/// Polygons created within the same second are ordered by descending id.
#[derive(Default)]
pub struct ListPolygons;

impl ListPolygons {
    /// Creates a new `ListPolygons` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    pub fn execute(&self, db: &Database) -> Result<Vec<PolygonSummary>> {
        db.read(|conn| {
            let rows = diesel::sql_query(LIST_POLYGONS).load::<PolygonSummaryRow>(conn)?;
            Ok(rows.into_iter().map(PolygonSummary::from).collect())
        })
    }
}
