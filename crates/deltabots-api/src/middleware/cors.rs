//! CORS layer configuration.

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use deltabots_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// The configured API key header is always allowed alongside
/// `Authorization` and `Content-Type`.
pub fn build_cors_layer(config: &CorsConfig, api_key_header: &str) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if config.allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    let mut headers = vec![AUTHORIZATION, CONTENT_TYPE];
    match HeaderName::try_from(api_key_header) {
        Ok(name) => headers.push(name),
        Err(e) => tracing::warn!(header = %api_key_header, error = %e, "Ignoring invalid API key header name for CORS"),
    }

    layer
        .allow_headers(headers)
        .max_age(std::time::Duration::from_secs(config.max_age_seconds))
}
