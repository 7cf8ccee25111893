use diesel::prelude::*;
use tracing::info;

use super::validate_ring;
use crate::error::Result;
use crate::math::Point2;
use crate::model::{PolygonId, PolygonName};
use crate::operations::coordinate::FindOrInsertPoint;
use crate::storage::rows::{NewPolygon, NewPolygonVertex};
use crate::storage::schema::{polygon_vertices, polygons};
use crate::storage::Database;

/// Stores a polygon and its ordered ring in one transaction.
///
/// Each vertex is resolved through the coordinate pool and linked with
/// `order = index`. If any step fails nothing from the call persists:
/// not the polygon row, not its links, not the coordinates it created.
pub struct InsertPolygon {
    name: String,
    description: Option<String>,
    vertices: Vec<Point2>,
}

impl InsertPolygon {
    /// Creates a new `InsertPolygon` operation without a description.
    #[must_use]
    pub fn new(name: impl Into<String>, vertices: Vec<Point2>) -> Self {
        Self {
            name: name.into(),
            description: None,
            vertices,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Executes the operation, returning the new polygon's id.
    ///
    /// # Errors
    ///
    /// Returns a validation error (before touching the database) for an
    /// invalid name or ring, or a storage error, e.g. when the name is taken.
    pub fn execute(&self, db: &Database) -> Result<PolygonId> {
        let name = PolygonName::parse(&self.name)?;
        validate_ring(&self.vertices)?;
        let tolerance = db.point_tolerance();

        let id = db.write("insert_polygon", |conn| {
            let polygon_id = diesel::insert_into(polygons::table)
                .values(&NewPolygon {
                    polygon_name: name.as_str(),
                    description: self.description.as_deref(),
                })
                .returning(polygons::polygon_id)
                .get_result::<i64>(conn)?;

            for (order, vertex) in (0..).zip(&self.vertices) {
                let point_id = FindOrInsertPoint::new(*vertex, tolerance).execute_in(conn)?;
                diesel::insert_into(polygon_vertices::table)
                    .values(&NewPolygonVertex {
                        polygon_id,
                        point_id: point_id.0,
                        vertex_order: order,
                    })
                    .execute(conn)?;
            }
            Ok(PolygonId(polygon_id))
        })?;

        info!(polygon_id = %id, name = %name, vertices = self.vertices.len(), "polygon saved");
        Ok(id)
    }
}
