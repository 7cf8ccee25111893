use std::path::PathBuf;

use diesel::result::DatabaseErrorKind;
use thiserror::Error;

use crate::model::PolygonId;

/// Top-level error type for the Parcelis store.
#[derive(Debug, Error)]
pub enum ParcelisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("polygon {0} not found")]
    PolygonNotFound(PolygonId),
}

impl From<diesel::result::Error> for ParcelisError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Storage(StorageError::Query(err))
    }
}

/// Input rejected before any storage access.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("polygon name cannot be empty")]
    EmptyName,

    #[error("polygon name is too long ({length} characters, maximum {max})")]
    NameTooLong { length: usize, max: usize },

    #[error("polygon name {0:?} may only contain letters, numbers, spaces, hyphens and underscores")]
    InvalidNameCharacters(String),

    #[error("a polygon needs at least {min} vertices, got {count}")]
    TooFewVertices { count: usize, min: usize },

    #[error("a polygon cannot have {count} vertices")]
    TooManyVertices { count: usize },

    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },

    #[error("point has a non-finite coordinate")]
    NonFinitePoint,
}

/// Failures raised by the storage engine.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to open database at {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: diesel::ConnectionError,
    },

    #[error("database path {} is not valid UTF-8", .0.display())]
    InvalidPath(PathBuf),

    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

impl StorageError {
    /// Returns `true` when the failure is a uniqueness constraint violation,
    /// e.g. a polygon name that is already taken.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Query(diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _
            ))
        )
    }
}

/// Invalid store configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("database path cannot be empty")]
    EmptyDatabasePath,

    #[error("point tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),
}

/// Convenience type alias for results using [`ParcelisError`].
pub type Result<T> = std::result::Result<T, ParcelisError>;

impl ParcelisError {
    /// Returns the storage error if this is a storage failure.
    #[must_use]
    pub fn as_storage(&self) -> Option<&StorageError> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}
