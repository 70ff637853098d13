//! Per-route authentication extractors.
//!
//! A handler taking [`BearerAuth`] accepts only `Authorization: Bearer`
//! tokens; one taking [`ApiKeyAuth`] accepts only the API key header.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use deltabots_auth::{AuthScheme, Principal};

use crate::error::ApiError;
use crate::state::AppState;

/// Principal authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct BearerAuth(pub Principal);

/// Principal authenticated with an API key.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth(pub Principal);

impl std::ops::Deref for BearerAuth {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::Deref for ApiKeyAuth {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for BearerAuth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token);

        state
            .gateway
            .authenticate(AuthScheme::BearerToken, token)
            .await
            .map(BearerAuth)
            .map_err(|e| ApiError::from(e).with_challenge("Bearer"))
    }
}

impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(state.config.auth.api_key_header.as_str())
            .and_then(|v| v.to_str().ok());

        state
            .gateway
            .authenticate(AuthScheme::ApiKey, key)
            .await
            .map(ApiKeyAuth)
            .map_err(ApiError::from)
    }
}

/// Extracts the token from an `Authorization` value, scheme case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then_some(token.trim())
}
