use std::time::Duration;

use sea_orm::sea_query::Index;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::info;

use crate::dog;

/// Name of the unique index that rejects a second dog with the same attributes.
pub const DOG_IDENTITY_INDEX: &str = "idx_dogs_identity";

/// Pool settings handed to SeaORM.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from(&configs::DatabaseConfig::default())
    }
}

impl DatabaseConfig {
    /// Pool defaults with the connection string taken from `DATABASE_URL`,
    /// falling back to [`configs::DEFAULT_DATABASE_URL`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| configs::DEFAULT_DATABASE_URL.to_string());
        Self { url, ..Self::default() }
    }

    /// Configuration for a file-backed SQLite database at `path`, created if missing.
    pub fn sqlite_file(path: impl AsRef<std::path::Path>) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path.as_ref().display()),
            ..Self::default()
        }
    }
}

impl From<&configs::DatabaseConfig> for DatabaseConfig {
    fn from(cfg: &configs::DatabaseConfig) -> Self {
        Self {
            url: cfg.url.clone(),
            max_connections: cfg.max_connections,
            min_connections: cfg.min_connections,
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            acquire_timeout: Duration::from_secs(cfg.acquire_timeout_secs),
            idle_timeout: Duration::from_secs(cfg.idle_timeout_secs),
            max_lifetime: Duration::from_secs(cfg.max_lifetime_secs),
            sqlx_logging: cfg.sqlx_logging,
        }
    }
}

pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    connect_with_config(&DatabaseConfig::from_env()).await
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(cfg.connect_timeout)
        .acquire_timeout(cfg.acquire_timeout)
        .idle_timeout(cfg.idle_timeout)
        .max_lifetime(cfg.max_lifetime)
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opt).await?;
    Ok(db)
}

/// Create the `dogs` table and its indexes unless they already exist.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(dog::Entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    for mut index in schema.create_index_from_entity(dog::Entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }

    let identity = Index::create()
        .name(DOG_IDENTITY_INDEX)
        .table(dog::Entity)
        .col(dog::Column::Name)
        .col(dog::Column::Breed)
        .col(dog::Column::Color)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&identity)).await?;

    info!(event = "schema_ready", table = "dogs", "dog schema ensured");
    Ok(())
}

/// Connect and make sure the schema exists; what the server does at startup.
pub async fn open(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(cfg).await?;
    ensure_schema(&db).await?;
    Ok(db)
}
