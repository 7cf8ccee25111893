//! Parcelis stores cadastral parcel polygons in an embedded SQLite database.
//!
//! Vertices are deduplicated into a shared coordinate pool within a per-axis
//! tolerance, polygons are recognised regardless of their starting vertex,
//! and every polygon write is a single transaction over the coordinate,
//! polygon and vertex-link tables.

pub mod config;
pub mod error;
pub mod math;
pub mod model;
pub mod operations;
pub mod storage;
pub mod store;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test_support;

pub use config::{JournalMode, StoreConfig};
pub use error::{ConfigError, ParcelisError, Result, StorageError, ValidationError};
pub use math::{Point2, TOLERANCE};
pub use model::{Coordinate, PointId, Polygon, PolygonId, PolygonName, PolygonSummary};
pub use operations::query::MatchOutcome;
pub use storage::Database;
pub use store::{ParcelStore, SaveOutcome, DEFAULT_DESCRIPTION};
