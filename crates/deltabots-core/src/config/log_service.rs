//! Upstream RPA log service configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Connection settings for the third-party log service.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogServiceConfig {
    /// Base URL of the log service, without trailing slash.
    #[serde(default)]
    pub base_url: String,
    /// Bearer token presented to the log service.
    #[serde(default)]
    pub api_token: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl LogServiceConfig {
    /// Trims the URL and token.
    pub fn normalize(&mut self) {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self.api_token = self.api_token.trim().to_string();
    }
}

impl Default for LogServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_token: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl fmt::Debug for LogServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogServiceConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

fn default_timeout() -> u64 {
    10
}
