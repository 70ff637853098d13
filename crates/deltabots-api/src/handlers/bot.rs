//! Bot handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use deltabots_entity::bot::{CreateBot, RpaBot};

use crate::dto::request::{CreateBotRequest, LogRangeQuery};
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::{BearerAuth, PaginationParams};
use crate::state::AppState;

/// POST /bots
pub async fn create_bot(
    State(state): State<AppState>,
    auth: BearerAuth,
    Json(req): Json<CreateBotRequest>,
) -> Result<(StatusCode, Json<RpaBot>), ApiError> {
    validate(&req)?;
    let bot = state
        .bot_service
        .create(
            &auth,
            CreateBot {
                tenant_id: req.tenant_id,
                code: req.code,
                description: req.description,
                system_target: req.system_target,
                status: req.status,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(bot)))
}

/// GET /tenants/{id}/bots
pub async fn list_tenant_bots(
    State(state): State<AppState>,
    auth: BearerAuth,
    Path(tenant_id): Path<Uuid>,
    Query(page): Query<PaginationParams>,
) -> Result<Json<Vec<RpaBot>>, ApiError> {
    let bots = state
        .bot_service
        .list_by_tenant(&auth, tenant_id, page.into_page_request())
        .await?;
    Ok(Json(bots))
}

/// GET /bots/{code}
pub async fn get_bot(
    State(state): State<AppState>,
    auth: BearerAuth,
    Path(code): Path<String>,
) -> Result<Json<RpaBot>, ApiError> {
    Ok(Json(state.bot_service.get_by_code(&auth, &code).await?))
}

/// GET /bots/{code}/logs
///
/// Ownership is checked before the upstream log service is contacted.
pub async fn get_bot_logs(
    State(state): State<AppState>,
    auth: BearerAuth,
    Path(code): Path<String>,
    Query(range): Query<LogRangeQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let bot = state.bot_service.get_by_code(&auth, &code).await?;
    let logs = state
        .log_client
        .fetch_logs(&bot.code, range.start, range.end)
        .await?;
    Ok(Json(logs))
}
