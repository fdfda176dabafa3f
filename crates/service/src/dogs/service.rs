use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::repository::DogRepository;
use super::{Dog, NewDog};
use crate::errors::ServiceError;

/// Dog registry operations, independent of the web framework.
pub struct DogService<R: DogRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: DogRepository + ?Sized> DogService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Every stored dog, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Dog>, ServiceError> {
        self.repo.list_all().await
    }

    /// Store a new dog and return it with its assigned id.
    ///
    /// # Examples
    /// ```
    /// use service::dogs::{NewDog, service::DogService, repository::mock::MockDogRepository};
    /// use std::sync::Arc;
    /// let svc = DogService::new(Arc::new(MockDogRepository::default()));
    /// let rex = tokio_test::block_on(svc.insert(NewDog::new("Rex", "Labrador", "Black"))).unwrap();
    /// assert_eq!(rex.id, 1);
    /// let again = tokio_test::block_on(svc.insert(NewDog::new("Rex", "Labrador", "Black")));
    /// assert_eq!(again.unwrap_err().to_string(), "Dog already exists");
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name, breed = %input.breed))]
    pub async fn insert(&self, input: NewDog) -> Result<Dog, ServiceError> {
        match self.repo.insert(&input).await {
            Ok(dog) => {
                info!(dog_id = dog.id, event = "dog_created", "dog stored");
                Ok(dog)
            }
            Err(e @ ServiceError::Conflict(_)) => {
                warn!(event = "dog_duplicate_rejected", color = %input.color, "dog with identical attributes exists");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dogs::repository::{mock::MockDogRepository, SeaOrmDogRepository};
    use crate::test_support::get_db;

    async fn exercise<R: DogRepository + ?Sized>(svc: &DogService<R>) -> Result<(), anyhow::Error> {
        assert!(svc.list_all().await?.is_empty());

        let rex = svc.insert(NewDog::new("Rex", "Labrador", "Black")).await?;
        assert_eq!(rex.id, 1);

        let dup = svc.insert(NewDog::new("Rex", "Labrador", "Black")).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(ref m)) if m == "Dog already exists"));

        let fido = svc.insert(NewDog::new("Fido", "Beagle", "Brown")).await?;
        assert_ne!(fido.id, rex.id);

        let all = svc.list_all().await?;
        assert_eq!(all, vec![rex, fido]);
        Ok(())
    }

    #[tokio::test]
    async fn dog_service_over_mock() -> Result<(), anyhow::Error> {
        let svc = DogService::new(Arc::new(MockDogRepository::default()));
        exercise(&svc).await
    }

    #[tokio::test]
    async fn dog_service_over_sqlite() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_db().await?;
        let svc = DogService::new(Arc::new(SeaOrmDogRepository::new(db)));
        exercise(&svc).await
    }

    #[tokio::test]
    async fn works_behind_trait_object() -> Result<(), anyhow::Error> {
        let repo: Arc<dyn DogRepository> = Arc::new(MockDogRepository::default());
        let svc: DogService<dyn DogRepository> = DogService::new(repo);
        exercise(&svc).await
    }
}
