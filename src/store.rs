use tracing::debug;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::math::ring::strip_closing_vertex;
use crate::math::Point2;
use crate::model::{Coordinate, PointId, Polygon, PolygonId, PolygonSummary};
use crate::operations::coordinate::{FindOrInsertPoint, ListCoordinates};
use crate::operations::polygon::{InsertPolygon, RenamePolygon};
use crate::operations::query::{
    FindPolygonByVertices, GetPolygon, GetVertices, ListPolygons, MatchOutcome,
};
use crate::storage::Database;

/// Description given to parcels saved through [`ParcelStore::save_parcel`].
pub const DEFAULT_DESCRIPTION: &str = "Cadastral Parcel";

/// What [`ParcelStore::save_parcel`] did with a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The ring was new and is now stored under this id.
    Inserted(PolygonId),
    /// An equal ring was already stored; nothing was written.
    Existing(PolygonId),
}

impl SaveOutcome {
    #[must_use]
    pub fn polygon_id(self) -> PolygonId {
        match self {
            Self::Inserted(id) | Self::Existing(id) => id,
        }
    }
}

/// Entry point for the presentation layer.
///
/// Wraps a [`Database`] and exposes every store operation as a method.
/// Cloning is cheap; clones share nothing but the database file.
#[derive(Debug, Clone)]
pub struct ParcelStore {
    db: Database,
}

impl ParcelStore {
    /// Opens the store described by `config`.
    ///
    /// # Errors
    ///
    /// See [`Database::open`].
    pub fn open(config: StoreConfig) -> Result<Self> {
        Ok(Self {
            db: Database::open(config)?,
        })
    }

    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// # Errors
    ///
    /// Returns the storage error that prevented a round trip.
    pub fn test_connection(&self) -> Result<()> {
        self.db.test_connection()
    }

    /// Stores a polygon with its ordered ring. See [`InsertPolygon`].
    ///
    /// # Errors
    ///
    /// Validation errors precede any I/O; storage errors leave no trace of
    /// the attempt.
    pub fn insert_polygon(
        &self,
        name: &str,
        description: Option<&str>,
        vertices: &[Point2],
    ) -> Result<PolygonId> {
        let mut op = InsertPolygon::new(name, vertices.to_vec());
        if let Some(description) = description {
            op = op.with_description(description);
        }
        op.execute(&self.db)
    }

    /// # Errors
    ///
    /// See [`RenamePolygon::execute`].
    pub fn rename_polygon(&self, polygon: PolygonId, new_name: &str) -> Result<()> {
        RenamePolygon::new(polygon, new_name).execute(&self.db)
    }

    /// Looks for a stored polygon equal to `vertices` up to rotation.
    #[must_use]
    pub fn find_polygon_id_by_vertices(&self, vertices: &[Point2], tolerance: f64) -> MatchOutcome {
        FindPolygonByVertices::new(vertices.to_vec(), tolerance).execute(&self.db)
    }

    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    pub fn list_polygons(&self) -> Result<Vec<PolygonSummary>> {
        ListPolygons::new().execute(&self.db)
    }

    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    pub fn get_vertices(&self, polygon: PolygonId) -> Result<Vec<Point2>> {
        GetVertices::new(polygon).execute(&self.db)
    }

    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    pub fn get_polygon(&self, polygon: PolygonId) -> Result<Option<Polygon>> {
        GetPolygon::new(polygon).execute(&self.db)
    }

    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    pub fn list_coordinates(&self) -> Result<Vec<Coordinate>> {
        ListCoordinates::new().execute(&self.db)
    }

    /// Resolves a single position in the coordinate pool.
    ///
    /// # Errors
    ///
    /// See [`FindOrInsertPoint::execute`].
    pub fn find_or_insert_point(&self, position: Point2) -> Result<PointId> {
        FindOrInsertPoint::new(position, self.db.point_tolerance()).execute(&self.db)
    }

    /// Saves a ring coming straight from a drawing, unless it is already
    /// stored.
    ///
    /// A repeated closing vertex is dropped first. The duplicate check and
    /// the insert are separate steps, so two callers saving the same ring at
    /// once can both insert it.
    ///
    /// # Errors
    ///
    /// Returns the scan failure if the duplicate check was inconclusive, or
    /// any error from [`InsertPolygon::execute`].
    pub fn save_parcel(&self, name: &str, vertices: &[Point2]) -> Result<SaveOutcome> {
        let tolerance = self.db.point_tolerance();
        let ring = strip_closing_vertex(vertices, tolerance);

        if let Some(id) = self.find_polygon_id_by_vertices(ring, tolerance).into_result()? {
            debug!(polygon_id = %id, "parcel already stored");
            return Ok(SaveOutcome::Existing(id));
        }
        self.insert_polygon(name, Some(DEFAULT_DESCRIPTION), ring)
            .map(SaveOutcome::Inserted)
    }
}
