use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::TOLERANCE;

/// Default database file name.
pub const DEFAULT_DATABASE_FILE: &str = "ProjectData.db";

/// SQLite journal mode applied when the database is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    /// Write-ahead log: readers never block the writer.
    #[default]
    Wal,
    /// Classic rollback journal.
    Delete,
}

impl JournalMode {
    pub(crate) fn pragma(self) -> &'static str {
        match self {
            Self::Wal => "PRAGMA journal_mode = WAL;",
            Self::Delete => "PRAGMA journal_mode = DELETE;",
        }
    }
}

/// Configuration for opening a parcel store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the SQLite database file. Missing parent directories are created.
    pub database_path: PathBuf,
    /// Per-axis tolerance used when deduplicating coordinates.
    pub point_tolerance: f64,
    /// How long a connection waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,
    /// Journal mode set when the database is opened.
    pub journal_mode: JournalMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            point_tolerance: TOLERANCE,
            busy_timeout_ms: 5_000,
            journal_mode: JournalMode::Wal,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration for the database at `path`, other settings default.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_point_tolerance(mut self, tolerance: f64) -> Self {
        self.point_tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_busy_timeout_ms(mut self, millis: u64) -> Self {
        self.busy_timeout_ms = millis;
        self
    }

    #[must_use]
    pub fn with_journal_mode(mut self, mode: JournalMode) -> Self {
        self.journal_mode = mode;
        self
    }

    /// Checks the configuration before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an empty path or a tolerance that is not
    /// a finite positive number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }
        if !self.point_tolerance.is_finite() || self.point_tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(self.point_tolerance));
        }
        Ok(())
    }
}
