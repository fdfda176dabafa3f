use axum::{extract::{rejection::JsonRejection, State}, Json};
use service::dogs::{Dog, NewDog};
use tracing::info;

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/dogs", tag = "dogs",
    responses(
        (status = 200, description = "All dogs in insertion order", body = [crate::openapi::DogDoc]),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Dog>>, JsonApiError> {
    let dogs = state.dogs.list_all().await?;
    info!(count = dogs.len(), "list dogs");
    Ok(Json(dogs))
}

#[utoipa::path(
    post, path = "/dogs", tag = "dogs",
    request_body = crate::openapi::CreateDogDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::DogDoc),
        (status = 400, description = "Dog already exists", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Malformed body", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewDog>, JsonRejection>,
) -> Result<Json<Dog>, JsonApiError> {
    let Json(input) = payload.map_err(|rejection| {
        info!(reason = %rejection.body_text(), "rejected dog payload");
        JsonApiError::from(rejection)
    })?;
    let dog = state.dogs.insert(input).await?;
    Ok(Json(dog))
}
