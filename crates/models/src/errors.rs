use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("dog already exists")]
    Duplicate,
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => ModelError::Duplicate,
            _ => ModelError::Db(e.to_string()),
        }
    }
}
