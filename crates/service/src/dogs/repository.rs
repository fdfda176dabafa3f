use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::{Dog, NewDog};
use crate::errors::ServiceError;

/// Persistence operations the dog service needs.
#[async_trait]
pub trait DogRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Dog>, ServiceError>;
    async fn insert(&self, input: &NewDog) -> Result<Dog, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmDogRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmDogRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl DogRepository for SeaOrmDogRepository {
    async fn list_all(&self) -> Result<Vec<Dog>, ServiceError> {
        Ok(models::dog::list_all(&self.db).await?)
    }

    async fn insert(&self, input: &NewDog) -> Result<Dog, ServiceError> {
        Ok(models::dog::insert(&self.db, input).await?)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockDogRepository {
        dogs: Mutex<Vec<Dog>>,
    }

    #[async_trait]
    impl DogRepository for MockDogRepository {
        async fn list_all(&self) -> Result<Vec<Dog>, ServiceError> {
            Ok(self.dogs.lock().await.clone())
        }

        async fn insert(&self, input: &NewDog) -> Result<Dog, ServiceError> {
            let mut dogs = self.dogs.lock().await;
            let taken = dogs
                .iter()
                .any(|d| d.name == input.name && d.breed == input.breed && d.color == input.color);
            if taken {
                return Err(ServiceError::duplicate_dog());
            }
            let id = dogs.last().map_or(1, |d| d.id + 1);
            let dog = Dog {
                id,
                name: input.name.clone(),
                breed: input.breed.clone(),
                color: input.color.clone(),
            };
            dogs.push(dog.clone());
            Ok(dog)
        }
    }
}
