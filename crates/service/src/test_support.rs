#![cfg(test)]
use sea_orm::DatabaseConnection;
use tempfile::TempDir;
use models::db::{open, DatabaseConfig};

/// Fresh SQLite file with the dog schema in place. The directory is removed
/// when the returned `TempDir` drops.
pub async fn get_db() -> Result<(TempDir, DatabaseConnection), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let mut cfg = DatabaseConfig::sqlite_file(dir.path().join("service.db"));
    cfg.acquire_timeout = std::time::Duration::from_secs(10);
    let db = open(&cfg).await?;
    Ok((dir, db))
}
