//! Authentication configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Signing algorithms accepted for access tokens.
///
/// Only the symmetric HMAC family is supported since the signing secret is
/// a single shared value.
pub const SUPPORTED_JWT_ALGORITHMS: &[&str] = &["HS256", "HS384", "HS512"];

/// Authentication and credential configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing.
    #[serde(default)]
    pub jwt_secret: String,
    /// Signing algorithm identifier (`HS256`, `HS384` or `HS512`).
    #[serde(default = "default_algorithm")]
    pub jwt_algorithm: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Permanent superadmin API key.
    #[serde(default)]
    pub superadmin_key: String,
    /// Email of the superadmin account the permanent key acts as.
    #[serde(default = "default_superadmin_email")]
    pub superadmin_email: String,
    /// Initial superadmin password, consumed only by the setup flow.
    #[serde(default)]
    pub superadmin_password: Option<String>,
    /// Minimum password length for newly created users.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Header carrying API keys.
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
}

impl AuthConfig {
    /// Trims every value that takes part in a comparison.
    ///
    /// Environment-injected trailing newlines would otherwise cause
    /// spurious key and email mismatches.
    pub fn normalize(&mut self) {
        self.jwt_secret = self.jwt_secret.trim().to_string();
        self.jwt_algorithm = self.jwt_algorithm.trim().to_uppercase();
        self.superadmin_key = self.superadmin_key.trim().to_string();
        self.superadmin_email = self.superadmin_email.trim().to_string();
        self.api_key_header = self.api_key_header.trim().to_ascii_lowercase();
        self.superadmin_password = self
            .superadmin_password
            .take()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
    }

    /// Checks that the configuration can actually sign and verify credentials.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.is_empty() {
            return Err("auth.jwt_secret must not be empty".to_string());
        }
        if !SUPPORTED_JWT_ALGORITHMS.contains(&self.jwt_algorithm.as_str()) {
            return Err(format!(
                "auth.jwt_algorithm '{}' is not supported; expected one of {:?}",
                self.jwt_algorithm, SUPPORTED_JWT_ALGORITHMS
            ));
        }
        if self.superadmin_key.is_empty() {
            return Err("auth.superadmin_key must not be empty".to_string());
        }
        if self.superadmin_email.is_empty() {
            return Err("auth.superadmin_email must not be empty".to_string());
        }
        if self.api_key_header.is_empty() {
            return Err("auth.api_key_header must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_algorithm: default_algorithm(),
            access_token_ttl_minutes: default_access_ttl(),
            superadmin_key: String::new(),
            superadmin_email: default_superadmin_email(),
            superadmin_password: None,
            password_min_length: default_password_min(),
            api_key_header: default_api_key_header(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("superadmin_key", &"<redacted>")
            .field("superadmin_email", &self.superadmin_email)
            .field(
                "superadmin_password",
                &self.superadmin_password.as_ref().map(|_| "<redacted>"),
            )
            .field("password_min_length", &self.password_min_length)
            .field("api_key_header", &self.api_key_header)
            .finish()
    }
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_ttl() -> u64 {
    60
}

fn default_superadmin_email() -> String {
    "admin@deltabots.com.br".to_string()
}

fn default_password_min() -> usize {
    6
}

fn default_api_key_header() -> String {
    "x-api-key".to_string()
}
