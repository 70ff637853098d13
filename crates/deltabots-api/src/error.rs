//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use deltabots_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An [`AppError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    inner: AppError,
    /// `WWW-Authenticate` challenge attached to 401 responses.
    challenge: Option<&'static str>,
}

impl ApiError {
    /// Attaches a `WWW-Authenticate` challenge, used only if the error is a 401.
    pub fn with_challenge(mut self, scheme: &'static str) -> Self {
        self.challenge = Some(scheme);
        self
    }
}

impl From<AppError> for ApiError {
    fn from(inner: AppError) -> Self {
        Self {
            inner,
            challenge: None,
        }
    }
}

/// HTTP status and error code for each error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::InactiveAccount => (StatusCode::FORBIDDEN, "INACTIVE_ACCOUNT"),
        ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Validation => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
        ErrorKind::UpstreamAuth => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        ErrorKind::ServiceUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = status_for(self.inner.kind);

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(kind = %self.inner.kind, error = %self.inner.message, "Internal server error");
            "Internal server error".to_string()
        } else {
            self.inner.message
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            if let Some(scheme) = self.challenge {
                response
                    .headers_mut()
                    .insert(WWW_AUTHENTICATE, HeaderValue::from_static(scheme));
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Authentication).0, StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::InactiveAccount).0, StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::UpstreamAuth).0, StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(ErrorKind::Validation).0, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(ErrorKind::Database).0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let response = ApiError::from(AppError::database("relation \"users\" does not exist")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_challenge_only_on_401() {
        let response = ApiError::from(AppError::invalid_credentials())
            .with_challenge("Bearer")
            .into_response();
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");

        let response = ApiError::from(AppError::forbidden("no"))
            .with_challenge("Bearer")
            .into_response();
        assert!(response.headers().get(WWW_AUTHENTICATE).is_none());
    }
}
