//! API key handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use deltabots_entity::api_key::ApiKey;
use deltabots_service::{IssuedApiKey, NewApiKey};

use crate::dto::request::CreateApiKeyRequest;
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::ApiKeyAuth;
use crate::state::AppState;

/// POST /api-keys
///
/// The key value appears in this response only.
pub async fn create_api_key(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(req): Json<CreateApiKeyRequest>,
) -> Result<(StatusCode, Json<IssuedApiKey>), ApiError> {
    validate(&req)?;
    let issued = state
        .api_key_service
        .issue(
            &auth,
            NewApiKey {
                tenant_id: req.tenant_id,
                purpose: req.purpose,
                expires_in_days: req.expires_in_days,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(issued)))
}

/// DELETE /api-keys/{id}
pub async fn deactivate_api_key(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiKey>, ApiError> {
    Ok(Json(state.api_key_service.deactivate(&auth, id).await?))
}
