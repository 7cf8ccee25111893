use diesel::prelude::*;

use crate::error::Result;
use crate::model::Coordinate;
use crate::storage::rows::CoordinateRow;
use crate::storage::schema::coordinates;
use crate::storage::Database;

/// Lists the coordinate pool in id order.
#[derive(Default)]
pub struct ListCoordinates;

impl ListCoordinates {
    /// Creates a new `ListCoordinates` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    pub fn execute(&self, db: &Database) -> Result<Vec<Coordinate>> {
        db.read(|conn| {
            let rows = coordinates::table
                .order(coordinates::id.asc())
                .select(CoordinateRow::as_select())
                .load::<CoordinateRow>(conn)?;
            Ok(rows.into_iter().map(Coordinate::from).collect())
        })
    }
}
