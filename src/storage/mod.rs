pub(crate) mod guard;
pub(crate) mod rows;
pub mod schema;

use std::fs;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use tracing::{info, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StorageError};
use guard::MutationGuard;

/// Handle to a file-backed parcel database.
///
/// Holds no open connection: every operation opens its own and closes it
/// when done, so the handle is cheap to clone and share across threads.
#[derive(Debug, Clone)]
pub struct Database {
    config: StoreConfig,
    url: String,
}

impl Database {
    /// Opens (creating if needed) the database described by `config` and
    /// makes sure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the directory cannot
    /// be created, or the schema cannot be applied.
    pub fn open(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let url = config
            .database_path
            .to_str()
            .ok_or_else(|| StorageError::InvalidPath(config.database_path.clone()))?
            .to_owned();
        if let Some(parent) = config
            .database_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).map_err(StorageError::from)?;
        }

        let db = Self { config, url };
        let mut conn = db.connect()?;
        conn.batch_execute(db.config.journal_mode.pragma())?;
        conn.transaction(|conn| conn.batch_execute(schema::CREATE_SCHEMA))?;
        info!(path = %db.url, "database opened");
        Ok(db)
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Tolerance used by the coordinate store.
    #[must_use]
    pub fn point_tolerance(&self) -> f64 {
        self.config.point_tolerance
    }

    /// Opens a connection and runs a trivial query.
    ///
    /// # Errors
    ///
    /// Returns the storage error that prevented the round trip.
    pub fn test_connection(&self) -> Result<()> {
        let mut conn = self.connect()?;
        conn.batch_execute("SELECT 1;")?;
        Ok(())
    }

    /// Opens a fresh connection with foreign keys and the busy timeout set.
    pub(crate) fn connect(&self) -> Result<SqliteConnection> {
        let mut conn =
            SqliteConnection::establish(&self.url).map_err(|source| StorageError::Connection {
                path: self.url.clone(),
                source,
            })?;
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.config.busy_timeout_ms
        ))?;
        Ok(conn)
    }

    /// Runs `f` inside a read transaction on its own connection.
    ///
    /// Reads do not take the mutation guard; the transaction gives them a
    /// snapshot of the last committed state.
    pub(crate) fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T>,
    {
        let mut conn = self.connect()?;
        conn.transaction(f)
    }

    /// Runs `f` as one atomic write.
    ///
    /// The mutation guard is held for the whole call and the transaction
    /// starts with `BEGIN IMMEDIATE`, so the database write lock is taken
    /// before `f` reads anything. Any error rolls the transaction back and is
    /// returned unchanged.
    pub(crate) fn write<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T>,
    {
        let _guard = MutationGuard::acquire(operation);
        let mut conn = self.connect()?;
        conn.immediate_transaction(f).inspect_err(|err| {
            warn!(operation, error = %err, "transaction rolled back");
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::JournalMode;
    use crate::error::{ConfigError, ParcelisError, ValidationError};
    use crate::test_support::{count_rows, temp_database};

    #[test]
    fn open_creates_schema() {
        let (_dir, db) = temp_database();
        assert_eq!(count_rows(&db, "Coordinates"), 0);
        assert_eq!(count_rows(&db, "Polygons"), 0);
        assert_eq!(count_rows(&db, "PolygonVertices"), 0);
    }

    #[test]
    fn open_is_idempotent() {
        let (_dir, db) = temp_database();
        let reopened = Database::open(db.config().clone()).unwrap();
        reopened.test_connection().unwrap();
    }

    #[test]
    fn open_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("parcels.db");
        let db = Database::open(StoreConfig::new(&path).with_journal_mode(JournalMode::Delete))
            .unwrap();
        assert!(path.exists());
        db.test_connection().unwrap();
    }

    #[test]
    fn open_rejects_invalid_config() {
        let err = Database::open(StoreConfig::new("")).unwrap_err();
        assert!(matches!(
            err,
            ParcelisError::Config(ConfigError::EmptyDatabasePath)
        ));
    }

    #[test]
    fn connections_enforce_foreign_keys() {
        let (_dir, db) = temp_database();
        let err = db
            .write("orphan link", |conn| {
                diesel::sql_query(
                    "INSERT INTO PolygonVertices (PolygonID, PointID, VertexOrder) VALUES (99, 99, 0)",
                )
                .execute(conn)?;
                Ok(())
            })
            .unwrap_err();
        assert!(err.as_storage().is_some());
        assert_eq!(count_rows(&db, "PolygonVertices"), 0);
    }

    #[test]
    fn write_rolls_back_on_error() {
        let (_dir, db) = temp_database();
        let result: Result<()> = db.write("failing", |conn| {
            diesel::sql_query("INSERT INTO Polygons (PolygonName) VALUES ('doomed')").execute(conn)?;
            Err(ParcelisError::Validation(ValidationError::EmptyName))
        });
        assert!(result.is_err());
        assert_eq!(count_rows(&db, "Polygons"), 0);
    }
}
