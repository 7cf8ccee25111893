use diesel::prelude::*;

use crate::error::Result;
use crate::model::{Polygon, PolygonId};
use crate::storage::rows::PolygonRow;
use crate::storage::schema::polygons;
use crate::storage::Database;

/// Looks up a single polygon header.
pub struct GetPolygon {
    polygon: PolygonId,
}

impl GetPolygon {
    /// Creates a new `GetPolygon` query.
    #[must_use]
    pub fn new(polygon: PolygonId) -> Self {
        Self { polygon }
    }

    /// Executes the query, returning `None` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    pub fn execute(&self, db: &Database) -> Result<Option<Polygon>> {
        db.read(|conn| {
            let row = polygons::table
                .find(self.polygon.0)
                .select(PolygonRow::as_select())
                .first::<PolygonRow>(conn)
                .optional()?;
            Ok(row.map(Polygon::from))
        })
    }
}
