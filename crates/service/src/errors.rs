use models::errors::ModelError;
use thiserror::Error;

/// Message returned to clients when a dog with the same attributes exists.
pub const DUPLICATE_DOG_MESSAGE: &str = "Dog already exists";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn duplicate_dog() -> Self { Self::Conflict(DUPLICATE_DOG_MESSAGE.to_string()) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Duplicate => Self::duplicate_dog(),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}
