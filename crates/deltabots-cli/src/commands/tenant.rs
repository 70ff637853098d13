//! Tenant inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use deltabots_auth::AuthorizationPolicy;
use deltabots_core::config::AppConfig;
use deltabots_core::error::AppError;
use deltabots_core::types::PageRequest;
use deltabots_service::TenantService;

use crate::output::{self, OutputFormat};

/// Arguments for tenant commands
#[derive(Debug, Args)]
pub struct TenantArgs {
    /// Tenant subcommand
    #[command(subcommand)]
    pub command: TenantCommand,
}

/// Tenant subcommands
#[derive(Debug, Subcommand)]
pub enum TenantCommand {
    /// List tenants
    List {
        /// Rows to skip
        #[arg(long, default_value_t = 0)]
        skip: u64,
        /// Rows to show (at most 100)
        #[arg(long, default_value_t = 100)]
        limit: u64,
    },
}

/// Tenant display row for table output
#[derive(Debug, Serialize, Tabled)]
struct TenantRow {
    id: String,
    name: String,
    status: String,
    contact: String,
    created_at: String,
}

/// Execute tenant commands
pub async fn execute(
    args: &TenantArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::connect_store(config).await?;
    let principal = super::superadmin_principal(config, store.as_ref()).await?;
    let service = TenantService::new(store, AuthorizationPolicy::new());

    match &args.command {
        TenantCommand::List { skip, limit } => {
            let tenants = service
                .list(&principal, PageRequest::new(*skip, *limit))
                .await?;

            let rows: Vec<TenantRow> = tenants
                .iter()
                .map(|t| TenantRow {
                    id: t.id.to_string(),
                    name: t.name.clone(),
                    status: t.status.to_string(),
                    contact: t.contact_user_id.map(|id| id.to_string()).unwrap_or_default(),
                    created_at: t.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
    }

    Ok(())
}
