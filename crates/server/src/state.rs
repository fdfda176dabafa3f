use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::dogs::repository::{DogRepository, SeaOrmDogRepository};
use service::dogs::service::DogService;

/// Shared handler state. Built once at startup; cloning only bumps refcounts.
#[derive(Clone)]
pub struct ServerState {
    pub dogs: Arc<DogService<dyn DogRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn DogRepository>) -> Self {
        Self { dogs: Arc::new(DogService::new(repo)) }
    }

    /// State backed by the SQLite store behind `db`.
    pub fn with_db(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmDogRepository::new(db)))
    }
}
