//! Start the Deltabots server.

use clap::Args;

use deltabots_core::config::AppConfig;
use deltabots_core::error::AppError;
use deltabots_database::migration::run_migrations;
use deltabots_database::{DatabasePool, PgCredentialStore};

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip database migrations on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting Deltabots server on {}", config.server.bind_address());

    let pool = DatabasePool::connect(&config.database).await?;
    if !args.skip_migrations {
        run_migrations(pool.pool()).await?;
    }

    let store = std::sync::Arc::new(PgCredentialStore::new(pool.into_pool()));
    deltabots_api::serve(config, store).await
}
