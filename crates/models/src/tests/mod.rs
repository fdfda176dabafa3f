use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use crate::db::{self, DatabaseConfig};

/// Database connection and schema bootstrap tests
pub mod db_tests;

/// Insert/list behaviour of the dog store
pub mod dog_tests;

/// Fresh file-backed SQLite database; keep the `TempDir` alive for the test's duration.
pub(crate) async fn setup_test_db() -> anyhow::Result<(TempDir, DatabaseConnection)> {
    let dir = tempfile::tempdir()?;
    let cfg = DatabaseConfig::sqlite_file(dir.path().join("dogs.db"));
    let db = db::open(&cfg).await?;
    Ok((dir, db))
}
