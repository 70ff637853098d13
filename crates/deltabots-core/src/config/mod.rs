//! Application configuration schemas.
//!
//! The configuration is assembled once at startup from TOML files and
//! `DELTABOTS__`-prefixed environment variables, normalized, validated,
//! and then shared immutably.

pub mod app;
pub mod auth;
pub mod database;
pub mod log_service;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::log_service::LogServiceConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Upstream log service settings.
    #[serde(default)]
    pub log_service: LogServiceConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Sources, later overriding earlier: `.env` (via dotenvy),
    /// `{dir}/default.toml`, `{dir}/{env}.toml`, and environment variables
    /// such as `DELTABOTS__AUTH__JWT_SECRET`.
    pub fn load(dir: &str, env: &str) -> Result<Self, AppError> {
        // A missing .env file is the normal case in deployed environments.
        let _ = dotenvy::dotenv();
        Self::load_from(dir, env, environment_source())
    }

    /// Load with an explicit environment-variable source.
    ///
    /// Values are kept as strings; numeric fields are converted during
    /// deserialization so secrets such as `00123456` survive untouched.
    pub fn load_from(
        dir: &str,
        env: &str,
        environment: config::Environment,
    ) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let mut loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.normalize();
        loaded.validate()?;

        tracing::debug!(
            env = %env,
            algorithm = %loaded.auth.jwt_algorithm,
            ttl_minutes = loaded.auth.access_token_ttl_minutes,
            "Configuration loaded"
        );

        Ok(loaded)
    }

    /// Trims all comparison-relevant strings in place.
    pub fn normalize(&mut self) {
        self.auth.normalize();
        self.log_service.normalize();
        self.database.url = self.database.url.trim().to_string();
    }

    /// Rejects configurations the service cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate().map_err(AppError::configuration)?;
        if self.database.url.is_empty() {
            return Err(AppError::configuration("database.url must not be empty"));
        }
        Ok(())
    }
}

/// The `DELTABOTS__SECTION__KEY` environment source.
pub fn environment_source() -> config::Environment {
    config::Environment::with_prefix("DELTABOTS")
        .prefix_separator("__")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment_source().source(Some(map))
    }

    #[test]
    fn test_env_strings_keep_leading_zeros() {
        let environment = env_with(&[
            ("DELTABOTS__DATABASE__URL", "postgres://localhost/deltabots"),
            ("DELTABOTS__AUTH__JWT_SECRET", "0042"),
            ("DELTABOTS__AUTH__SUPERADMIN_KEY", "00123456"),
            ("DELTABOTS__AUTH__SUPERADMIN_PASSWORD", "012345678"),
            ("DELTABOTS__SERVER__PORT", "9000"),
        ]);

        let config = AppConfig::load_from("does-not-exist", "test", environment).unwrap();
        assert_eq!(config.auth.superadmin_key, "00123456");
        assert_eq!(config.auth.jwt_secret, "0042");
        assert_eq!(config.auth.superadmin_password.as_deref(), Some("012345678"));
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_missing_database_url_is_rejected() {
        let environment = env_with(&[
            ("DELTABOTS__DATABASE__URL", "   "),
            ("DELTABOTS__AUTH__JWT_SECRET", "secret"),
            ("DELTABOTS__AUTH__SUPERADMIN_KEY", "key"),
        ]);
        assert!(AppConfig::load_from("does-not-exist", "test", environment).is_err());
    }
}
