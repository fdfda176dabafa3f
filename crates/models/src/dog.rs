use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dogs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub name: String,
    pub breed: String,
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Attributes of a dog that does not have an id yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDog {
    pub name: String,
    pub breed: String,
    pub color: String,
}

impl NewDog {
    pub fn new(name: impl Into<String>, breed: impl Into<String>, color: impl Into<String>) -> Self {
        Self { name: name.into(), breed: breed.into(), color: color.into() }
    }
}

/// All dogs in insertion order.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    let dogs = Entity::find().order_by_asc(Column::Id).all(db).await?;
    Ok(dogs)
}

/// Insert a dog inside its own transaction.
///
/// A row with the same `(name, breed, color)` makes the insert fail with
/// [`ModelError::Duplicate`]; the transaction is rolled back so the table is
/// left as it was.
pub async fn insert(db: &DatabaseConnection, input: &NewDog) -> Result<Model, ModelError> {
    let txn = db.begin().await?;
    let am = ActiveModel {
        name: Set(input.name.clone()),
        breed: Set(input.breed.clone()),
        color: Set(input.color.clone()),
        ..Default::default()
    };
    match am.insert(&txn).await {
        Ok(created) => {
            txn.commit().await?;
            Ok(created)
        }
        Err(e) => {
            if let Err(rb) = txn.rollback().await {
                warn!(error = %rb, "rollback after failed dog insert did not complete");
            }
            Err(e.into())
        }
    }
}
