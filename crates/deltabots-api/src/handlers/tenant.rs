//! Tenant handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use deltabots_entity::tenant::{CreateTenant, Tenant};

use crate::dto::request::CreateTenantRequest;
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::{ApiKeyAuth, BearerAuth, PaginationParams};
use crate::state::AppState;

/// POST /tenants
pub async fn create_tenant(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(req): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<Tenant>), ApiError> {
    validate(&req)?;
    let tenant = state
        .tenant_service
        .create(
            &auth,
            CreateTenant {
                name: req.name,
                status: req.status,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

/// GET /tenants
pub async fn list_tenants(
    State(state): State<AppState>,
    auth: BearerAuth,
    Query(page): Query<PaginationParams>,
) -> Result<Json<Vec<Tenant>>, ApiError> {
    let tenants = state
        .tenant_service
        .list(&auth, page.into_page_request())
        .await?;
    Ok(Json(tenants))
}

/// GET /tenants/{id}
pub async fn get_tenant(
    State(state): State<AppState>,
    auth: BearerAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<Tenant>, ApiError> {
    Ok(Json(state.tenant_service.get(&auth, id).await?))
}

/// DELETE /tenants/{id}
pub async fn delete_tenant(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.tenant_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
