//! Login body extractor accepting either a form or JSON.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::Deserialize;

use deltabots_core::error::AppError;

use crate::error::ApiError;

/// `username` (the email) and `password` from a login request.
#[derive(Deserialize)]
pub struct LoginCredentials {
    /// Account email.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl<S> FromRequest<S> for LoginCredentials
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.trim_start().starts_with("application/json"));

        if is_json {
            Json::<LoginCredentials>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|e| AppError::validation(e.body_text()).into())
        } else {
            Form::<LoginCredentials>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|e| AppError::validation(e.body_text()).into())
        }
    }
}
