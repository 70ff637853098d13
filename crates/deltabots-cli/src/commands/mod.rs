//! CLI command definitions and dispatch.

pub mod api_key;
pub mod migrate;
pub mod serve;
pub mod setup;
pub mod tenant;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use deltabots_auth::Principal;
use deltabots_core::config::AppConfig;
use deltabots_core::error::AppError;
use deltabots_database::{CredentialStore, DatabasePool, PgCredentialStore};

use crate::output::OutputFormat;

/// Deltabots: multi-tenant RPA management backend
#[derive(Debug, Parser)]
#[command(name = "deltabots", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and `{env}.toml`
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Environment name selecting the override file
    #[arg(long, env = "DELTABOTS_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Run pending database migrations
    Migrate,
    /// Create the internal tenant and the superadmin account
    Setup(setup::SetupArgs),
    /// API key management
    ApiKey(api_key::ApiKeyArgs),
    /// Tenant inspection
    Tenant(tenant::TenantArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config, &self.env)?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Setup(args) => setup::execute(args, config).await,
            Commands::ApiKey(args) => api_key::execute(args, &config).await,
            Commands::Tenant(args) => tenant::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: connect to PostgreSQL and wrap the pool in a credential store
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn CredentialStore>, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    Ok(Arc::new(PgCredentialStore::new(pool.into_pool())))
}

/// Helper: the configured superadmin account as a principal
///
/// Administrative commands act as this account so that they pass through
/// the same authorization checks as the HTTP API.
pub async fn superadmin_principal(
    config: &AppConfig,
    store: &dyn CredentialStore,
) -> Result<Principal, AppError> {
    let user = store
        .find_user_by_email(&config.auth.superadmin_email)
        .await?
        .filter(|u| u.is_superadmin() && u.is_active)
        .ok_or_else(|| {
            AppError::not_found(format!(
                "No active superadmin '{}'; run `setup` first",
                config.auth.superadmin_email
            ))
        })?;
    Ok(Principal::from(&user))
}
