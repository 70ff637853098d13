//! Root and health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{HealthResponse, MessageResponse};
use crate::state::AppState;

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Deltabots management API is running"))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, label, database) = match state.store.health_check().await {
        Ok(()) => (StatusCode::OK, "ok", "connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            database: database.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
