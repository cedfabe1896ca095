use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// CORS for the browser client: fixed origins, no credentials, any method/header.
pub fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins.to_vec())
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_credentials(false)
}
