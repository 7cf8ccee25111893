use diesel::dsl::now;
use diesel::prelude::*;
use tracing::info;

use crate::error::{ParcelisError, Result};
use crate::model::{PolygonId, PolygonName};
use crate::storage::schema::polygons;
use crate::storage::Database;

/// Renames a stored polygon and stamps its last-modified time.
pub struct RenamePolygon {
    polygon: PolygonId,
    new_name: String,
}

impl RenamePolygon {
    /// Creates a new `RenamePolygon` operation.
    #[must_use]
    pub fn new(polygon: PolygonId, new_name: impl Into<String>) -> Self {
        Self {
            polygon,
            new_name: new_name.into(),
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid name,
    /// [`ParcelisError::PolygonNotFound`] if no polygon has the id, or a
    /// storage error (e.g. the name is already taken).
    pub fn execute(&self, db: &Database) -> Result<()> {
        let name = PolygonName::parse(&self.new_name)?;

        let updated = db.write("rename_polygon", |conn| {
            Ok(diesel::update(polygons::table.find(self.polygon.0))
                .set((
                    polygons::polygon_name.eq(name.as_str()),
                    polygons::last_modified.eq(now),
                ))
                .execute(conn)?)
        })?;
        if updated == 0 {
            return Err(ParcelisError::PolygonNotFound(self.polygon));
        }

        info!(polygon_id = %self.polygon, name = %name, "polygon renamed");
        Ok(())
    }
}
