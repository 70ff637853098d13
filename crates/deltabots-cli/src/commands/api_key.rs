//! API key CLI commands.

use clap::{Args, Subcommand};
use uuid::Uuid;

use deltabots_auth::AuthorizationPolicy;
use deltabots_core::config::AppConfig;
use deltabots_core::error::AppError;
use deltabots_service::{ApiKeyService, NewApiKey};

use crate::output;

/// Arguments for API key commands
#[derive(Debug, Args)]
pub struct ApiKeyArgs {
    /// API key subcommand
    #[command(subcommand)]
    pub command: ApiKeyCommand,
}

/// API key subcommands
#[derive(Debug, Subcommand)]
pub enum ApiKeyCommand {
    /// Issue a tenant-scoped key. The key is printed once.
    Create {
        /// Tenant the key acts for
        #[arg(long)]
        tenant: Uuid,
        /// Free-text purpose
        #[arg(long)]
        purpose: String,
        /// Lifetime in days (non-expiring when omitted)
        #[arg(long)]
        expires_in_days: Option<u32>,
    },
    /// Deactivate a key by id
    Deactivate {
        /// Key id
        id: Uuid,
    },
}

/// Execute API key commands
pub async fn execute(args: &ApiKeyArgs, config: &AppConfig) -> Result<(), AppError> {
    let store = super::connect_store(config).await?;
    let principal = super::superadmin_principal(config, store.as_ref()).await?;
    let service = ApiKeyService::new(store, AuthorizationPolicy::new());

    match &args.command {
        ApiKeyCommand::Create {
            tenant,
            purpose,
            expires_in_days,
        } => {
            let issued = service
                .issue(
                    &principal,
                    NewApiKey {
                        tenant_id: *tenant,
                        purpose: purpose.clone(),
                        expires_in_days: *expires_in_days,
                    },
                )
                .await?;

            output::print_success(&format!("API key {} issued for tenant {tenant}", issued.record.id));
            if let Some(expires_at) = issued.record.expires_at {
                println!("  Expires: {}", expires_at.format("%Y-%m-%d %H:%M UTC"));
            }
            println!("  Key: {}", issued.key);
            output::print_warning("Store this key now; it cannot be shown again.");
        }
        ApiKeyCommand::Deactivate { id } => {
            service.deactivate(&principal, *id).await?;
            output::print_success(&format!("API key {id} deactivated"));
        }
    }

    Ok(())
}
