//! Database migration command.

use deltabots_core::config::AppConfig;
use deltabots_core::error::AppError;
use deltabots_database::DatabasePool;
use deltabots_database::migration::run_migrations;

use crate::output;

/// Execute the migrate command
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    println!("Running database migrations...");
    run_migrations(pool.pool()).await?;
    pool.close().await;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
