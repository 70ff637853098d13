//! Deltabots server: multi-tenant RPA management backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use deltabots_core::config::AppConfig;
use deltabots_core::error::AppError;
use deltabots_database::migration::run_migrations;
use deltabots_database::{DatabasePool, PgCredentialStore};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `DELTABOTS_CONFIG_DIR` for `DELTABOTS_ENV`
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("DELTABOTS_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("DELTABOTS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Deltabots server");

    let pool = DatabasePool::connect(&config.database).await?;
    run_migrations(pool.pool()).await?;

    let store = Arc::new(PgCredentialStore::new(pool.into_pool()));
    deltabots_api::serve(config, store).await
}
