use diesel::prelude::*;
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::math::{within_tolerance, Point2};
use crate::model::coordinate::{point_name, point_sequence};
use crate::model::PointId;
use crate::storage::rows::NewCoordinate;
use crate::storage::schema::coordinates;
use crate::storage::Database;

/// Resolves a position to a point in the shared coordinate pool, inserting a
/// new `PT_####` point when nothing lies within the tolerance window.
///
/// Matching is first-found in ascending id order, not nearest-found: when
/// several stored points fall inside the window, the oldest one wins.
pub struct FindOrInsertPoint {
    position: Point2,
    tolerance: f64,
}

impl FindOrInsertPoint {
    /// Creates a new `FindOrInsertPoint` operation.
    #[must_use]
    pub fn new(position: Point2, tolerance: f64) -> Self {
        Self {
            position,
            tolerance,
        }
    }

    /// Executes the operation as its own write.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-finite position, or a storage
    /// error if the lookup or insert fails.
    pub fn execute(&self, db: &Database) -> Result<PointId> {
        self.validate()?;
        db.write("find_or_insert_point", |conn| self.execute_in(conn))
    }

    /// Executes the operation inside the caller's transaction.
    pub(crate) fn execute_in(&self, conn: &mut SqliteConnection) -> Result<PointId> {
        if let Some(id) = self.find(conn)? {
            debug!(point_id = %id, x = self.position.x, y = self.position.y, "coordinate reused");
            return Ok(id);
        }

        let name = point_name(next_sequence(conn)?);
        let id = diesel::insert_into(coordinates::table)
            .values(&NewCoordinate {
                point_name: &name,
                x: self.position.x,
                y: self.position.y,
            })
            .returning(coordinates::id)
            .get_result::<i64>(conn)?;
        debug!(point_id = id, name = %name, "coordinate inserted");
        Ok(PointId(id))
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.position.x.is_finite() && self.position.y.is_finite() {
            Ok(())
        } else {
            Err(ValidationError::NonFinitePoint)
        }
    }

    fn find(&self, conn: &mut SqliteConnection) -> Result<Option<PointId>> {
        // Coarse window in SQL, exact strict test in Rust. The bounds are
        // inclusive: at large magnitudes `x ± window` can round back to `x`.
        let window = self.tolerance * 2.0;
        let (x, y) = (self.position.x, self.position.y);
        let candidates = coordinates::table
            .filter(coordinates::x.ge(x - window))
            .filter(coordinates::x.le(x + window))
            .filter(coordinates::y.ge(y - window))
            .filter(coordinates::y.le(y + window))
            .order(coordinates::id.asc())
            .select((coordinates::id, coordinates::x, coordinates::y))
            .load::<(i64, f64, f64)>(conn)?;

        Ok(candidates
            .into_iter()
            .find(|&(_, cx, cy)| {
                within_tolerance(&self.position, &Point2::new(cx, cy), self.tolerance)
            })
            .map(|(id, _, _)| PointId(id)))
    }
}

/// Next point sequence number: one past the largest `PT_####` suffix in use.
/// Gaps left by foreign or missing names are not reused.
///
/// The suffix saturates at `u64::MAX`; a pool that reaches it fails the next
/// insert with a unique violation on `PointName`.
fn next_sequence(conn: &mut SqliteConnection) -> Result<u64> {
    let names = coordinates::table
        .select(coordinates::point_name)
        .filter(coordinates::point_name.like("PT_%"))
        .load::<String>(conn)?;
    Ok(names
        .iter()
        .filter_map(|name| point_sequence(name))
        .max()
        .map_or(1, |n| n.saturating_add(1)))
}
