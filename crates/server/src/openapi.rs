use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct DogDoc { pub id: i32, pub name: String, pub breed: String, pub color: String }

#[derive(ToSchema)]
pub struct CreateDogDoc { pub name: String, pub breed: String, pub color: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String> }

/// Path the dog handlers are documented under; rewritten to the mounted base path.
pub const DOCUMENTED_DOGS_PATH: &str = "/dogs";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::dogs::list,
        crate::routes::dogs::create,
    ),
    components(
        schemas(
            HealthResponse,
            DogDoc,
            CreateDogDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "dogs")
    )
)]
pub struct ApiDoc;

/// OpenAPI document with the dog routes listed under `base_path`.
pub fn document(base_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if base_path != DOCUMENTED_DOGS_PATH {
        if let Some(item) = doc.paths.paths.remove(DOCUMENTED_DOGS_PATH) {
            doc.paths.paths.insert(base_path.to_string(), item);
        }
    }
    doc
}
