//! First-run setup handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use deltabots_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /setup/initial-user
///
/// Creates the internal tenant and the configured superadmin. Refuses with
/// 409 once any tenant exists.
pub async fn initial_user(State(state): State<AppState>) -> Result<(StatusCode, Json<User>), ApiError> {
    let (_, user) = state.setup_service.initialize(None).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
