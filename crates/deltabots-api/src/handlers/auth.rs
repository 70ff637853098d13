//! Auth handlers: login and me.

use axum::Json;
use axum::extract::State;

use deltabots_auth::AccessToken;
use deltabots_entity::user::User;

use crate::error::ApiError;
use crate::extractors::{BearerAuth, LoginCredentials};
use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    credentials: LoginCredentials,
) -> Result<Json<AccessToken>, ApiError> {
    let token = state
        .gateway
        .login(&credentials.username, &credentials.password)
        .await
        .map_err(|e| ApiError::from(e).with_challenge("Bearer"))?;

    Ok(Json(token))
}

/// GET /auth/me
pub async fn me(State(state): State<AppState>, auth: BearerAuth) -> Result<Json<User>, ApiError> {
    Ok(Json(state.user_service.current(&auth).await?))
}
