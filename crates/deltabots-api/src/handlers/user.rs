//! User handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use deltabots_entity::user::{User, UserRole};
use deltabots_service::NewUser;

use crate::dto::request::CreateUserRequest;
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::{ApiKeyAuth, BearerAuth, PaginationParams};
use crate::state::AppState;

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    validate(&req)?;
    let role = match req.role.as_deref() {
        Some(role) => role.parse::<UserRole>()?,
        None => UserRole::default(),
    };

    let user = state
        .user_service
        .create(
            &auth,
            NewUser {
                name: req.name,
                email: req.email,
                password: req.password,
                role,
                tenant_id: req.tenant_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /tenants/{id}/users
pub async fn list_tenant_users(
    State(state): State<AppState>,
    auth: BearerAuth,
    Path(tenant_id): Path<Uuid>,
    Query(page): Query<PaginationParams>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .user_service
        .list_by_tenant(&auth, tenant_id, page.into_page_request())
        .await?;
    Ok(Json(users))
}
