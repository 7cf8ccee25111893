//! Shared fixtures for unit tests.

use diesel::prelude::*;
use diesel::sql_types::BigInt;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

use crate::config::StoreConfig;
use crate::math::Point2;
use crate::storage::Database;

/// Installs a test-writer subscriber once; later calls are no-ops.
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=parcelis=debug`.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Opens a fresh database in a temporary directory. Keep the `TempDir`
/// alive for as long as the database is used.
pub(crate) fn temp_database() -> (TempDir, Database) {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(StoreConfig::new(dir.path().join("parcels.db"))).unwrap();
    (dir, db)
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = BigInt)]
    n: i64,
}

pub(crate) fn count_rows(db: &Database, table: &str) -> i64 {
    let mut conn = db.connect().unwrap();
    diesel::sql_query(format!("SELECT COUNT(*) AS n FROM {table}"))
        .get_result::<RowCount>(&mut conn)
        .unwrap()
        .n
}

pub(crate) fn ring(coords: &[(f64, f64)]) -> Vec<Point2> {
    coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
}
