use axum::http::HeaderValue;
use configs::CorsPolicy;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::errors::StartupError;

/// Build the CORS layer for a configured policy.
///
/// `SingleOrigin` allows credentials, so methods and headers are mirrored from
/// the preflight instead of using `*`.
pub fn build_cors(policy: &CorsPolicy) -> Result<CorsLayer, StartupError> {
    match policy {
        CorsPolicy::AnyOrigin => Ok(CorsLayer::very_permissive()),
        CorsPolicy::SingleOrigin { origin } => {
            let origin = HeaderValue::from_str(origin)
                .map_err(|e| StartupError::InvalidConfig(format!("cors origin {origin:?}: {e}")))?;
            Ok(CorsLayer::new()
                .allow_origin(AllowOrigin::exact(origin))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true))
        }
    }
}
