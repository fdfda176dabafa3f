use crate::db::{connect, connect_with_config, ensure_schema, open, DatabaseConfig, DOG_IDENTITY_INDEX};
use crate::dog::{self, NewDog};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

use super::setup_test_db;

async fn index_names(db: &sea_orm::DatabaseConnection) -> Result<Vec<String>> {
    let stmt = Statement::from_string(
        DatabaseBackend::Sqlite,
        "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'dogs' ORDER BY name".to_string(),
    );
    let rows = db.query_all(stmt).await?;
    let mut names = Vec::with_capacity(rows.len());
    for row in rows {
        names.push(row.try_get::<String>("", "name")?);
    }
    Ok(names)
}

/// Test basic database connection
#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db = connect_with_config(&DatabaseConfig::sqlite_file(dir.path().join("c.db"))).await?;

    let stmt = Statement::from_string(DatabaseBackend::Sqlite, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);
    Ok(())
}

#[tokio::test]
async fn schema_creates_table_and_indexes() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;
    let names = index_names(&db).await?;
    assert!(names.iter().any(|n| n == DOG_IDENTITY_INDEX), "indexes: {names:?}");
    assert!(names.iter().any(|n| n.contains("name")), "indexes: {names:?}");
    assert!(dog::list_all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn ensure_schema_is_idempotent() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;
    dog::insert(&db, &NewDog::new("Rex", "Labrador", "Black")).await?;

    ensure_schema(&db).await?;
    ensure_schema(&db).await?;

    let dogs = dog::list_all(&db).await?;
    assert_eq!(dogs.len(), 1);
    Ok(())
}

/// Records survive closing the pool and reopening the same file.
#[tokio::test]
async fn records_persist_across_restart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let cfg = DatabaseConfig::sqlite_file(dir.path().join("restart.db"));

    let db = open(&cfg).await?;
    let first = dog::insert(&db, &NewDog::new("Rex", "Labrador", "Black")).await?;
    db.close().await?;

    let db = open(&cfg).await?;
    let dogs = dog::list_all(&db).await?;
    assert_eq!(dogs, vec![first.clone()]);

    let second = dog::insert(&db, &NewDog::new("Fido", "Beagle", "Brown")).await?;
    assert!(second.id > first.id);
    Ok(())
}

#[test]
fn config_from_file_settings() {
    let mut file_cfg = configs::DatabaseConfig::default();
    file_cfg.url = "sqlite://./x.db".into();
    file_cfg.max_connections = 7;
    file_cfg.acquire_timeout_secs = 3;
    let cfg = DatabaseConfig::from(&file_cfg);
    assert_eq!(cfg.url, "sqlite://./x.db");
    assert_eq!(cfg.max_connections, 7);
    assert_eq!(cfg.acquire_timeout, std::time::Duration::from_secs(3));
}

#[test]
fn from_lookup_defaults_to_local_file() {
    let cfg = DatabaseConfig::from_lookup(|_| None);
    assert_eq!(cfg.url, configs::DEFAULT_DATABASE_URL);
    assert_eq!(cfg.url, "sqlite://./test.db?mode=rwc");

    let blank = DatabaseConfig::from_lookup(|_| Some("  ".into()));
    assert_eq!(blank.url, configs::DEFAULT_DATABASE_URL);

    let set = DatabaseConfig::from_lookup(|k| (k == "DATABASE_URL").then(|| "sqlite://./other.db".into()));
    assert_eq!(set.url, "sqlite://./other.db");
}

/// `connect` picks the store up from `DATABASE_URL`.
#[tokio::test]
async fn connect_reads_database_url() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("env.db").display());
    std::env::set_var("DATABASE_URL", &url);
    assert_eq!(DatabaseConfig::from_env().url, url);

    let db = connect().await?;
    std::env::remove_var("DATABASE_URL");
    ensure_schema(&db).await?;
    dog::insert(&db, &NewDog::new("Rex", "Labrador", "Black")).await?;
    assert!(dir.path().join("env.db").exists());
    Ok(())
}
