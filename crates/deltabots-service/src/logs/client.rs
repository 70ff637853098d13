//! HTTP client for the upstream log service.
//!
//! Upstream credential failures never surface as the caller's own 401:
//! they become `UpstreamAuth`, while unreachable or failing upstreams become
//! `ServiceUnavailable`. There are no retries.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{StatusCode, Url};
use tracing::warn;

use deltabots_core::config::LogServiceConfig;
use deltabots_core::error::AppError;

/// Queries bot execution logs for a date range.
#[derive(Clone)]
pub struct LogQueryClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl std::fmt::Debug for LogQueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogQueryClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl LogQueryClient {
    /// Builds a client with the configured request timeout.
    pub fn new(config: &LogServiceConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build log service client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            api_token: config.api_token.trim().to_string(),
        })
    }

    /// Fetches the logs of `bot_code` between `start` and `end`.
    pub async fn fetch_logs(
        &self,
        bot_code: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<serde_json::Value, AppError> {
        if start > end {
            return Err(AppError::validation("start must not be after end"));
        }
        if self.base_url.is_empty() {
            return Err(AppError::service_unavailable("Log service is not configured"));
        }

        let url = Url::parse_with_params(
            &format!("{}/logs", self.base_url),
            &[
                ("bot_code", bot_code.to_string()),
                ("start", start.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("end", end.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ],
        )
        .map_err(|e| AppError::configuration(format!("Invalid log service URL: {e}")))?;

        let mut request = self.http.get(url);
        if !self.api_token.is_empty() {
            request = request.bearer_auth(&self.api_token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(bot_code = %bot_code, timeout = e.is_timeout(), connect = e.is_connect(), "Log service unreachable");
            AppError::service_unavailable("Log service is unavailable")
        })?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            warn!(bot_code = %bot_code, status = %status, "Log service rejected our credentials");
            return Err(AppError::upstream_auth("Log service authentication failed"));
        }
        if !status.is_success() {
            warn!(bot_code = %bot_code, status = %status, "Log service returned an error");
            return Err(AppError::service_unavailable(format!(
                "Log service returned status {}",
                status.as_u16()
            )));
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
            warn!(bot_code = %bot_code, error = %e, "Log service returned an unreadable body");
            AppError::service_unavailable("Log service returned an invalid response")
        })
    }
}
