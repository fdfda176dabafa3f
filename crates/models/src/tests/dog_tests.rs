use std::collections::HashSet;

use anyhow::Result;

use crate::dog::{self, NewDog};
use crate::errors::ModelError;

use super::setup_test_db;

#[tokio::test]
async fn list_on_empty_table() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;
    assert!(dog::list_all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn insert_assigns_id_and_lists_once() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;

    let rex = dog::insert(&db, &NewDog::new("Rex", "Labrador", "Black")).await?;
    assert_eq!(rex.id, 1);
    assert_eq!(rex.name, "Rex");
    assert_eq!(rex.breed, "Labrador");
    assert_eq!(rex.color, "Black");

    let dogs = dog::list_all(&db).await?;
    assert_eq!(dogs, vec![rex]);
    Ok(())
}

#[tokio::test]
async fn duplicate_tuple_is_rejected_and_rolled_back() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;
    let input = NewDog::new("Rex", "Labrador", "Black");

    let first = dog::insert(&db, &input).await?;
    let err = dog::insert(&db, &input).await.unwrap_err();
    assert!(matches!(err, ModelError::Duplicate), "unexpected error: {err:?}");

    let dogs = dog::list_all(&db).await?;
    assert_eq!(dogs, vec![first]);

    // The pool connection used by the failed transaction is usable again.
    let next = dog::insert(&db, &NewDog::new("Rex", "Labrador", "Brown")).await?;
    assert_eq!(dog::list_all(&db).await?.len(), 2);
    assert!(next.id > 1);
    Ok(())
}

/// Uniqueness covers the whole tuple, not any single attribute.
#[tokio::test]
async fn partial_matches_are_distinct_dogs() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;
    dog::insert(&db, &NewDog::new("Rex", "Labrador", "Black")).await?;
    dog::insert(&db, &NewDog::new("Rex", "Labrador", "Yellow")).await?;
    dog::insert(&db, &NewDog::new("Rex", "Poodle", "Black")).await?;
    dog::insert(&db, &NewDog::new("Max", "Labrador", "Black")).await?;
    assert_eq!(dog::list_all(&db).await?.len(), 4);
    Ok(())
}

#[tokio::test]
async fn ids_are_unique_and_increasing() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;

    let mut ids = Vec::new();
    for i in 0..10 {
        let d = dog::insert(&db, &NewDog::new(format!("dog-{i}"), "Mixed", "Grey")).await?;
        ids.push(d.id);
    }
    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
    assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids not monotonic: {ids:?}");

    let listed: Vec<i32> = dog::list_all(&db).await?.into_iter().map(|d| d.id).collect();
    assert_eq!(listed, ids);
    Ok(())
}

#[tokio::test]
async fn empty_strings_are_stored_as_is() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;
    let d = dog::insert(&db, &NewDog::new("", "", "")).await?;
    assert_eq!(d.name, "");
    assert!(matches!(dog::insert(&db, &NewDog::new("", "", "")).await, Err(ModelError::Duplicate)));
    Ok(())
}
