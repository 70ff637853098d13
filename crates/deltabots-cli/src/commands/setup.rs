//! First-run setup from the command line.

use std::sync::Arc;

use clap::Args;

use deltabots_core::config::AppConfig;
use deltabots_core::error::AppError;
use deltabots_service::SetupService;

use crate::output;

/// Arguments for the setup command
#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Always prompt for the password, even if one is configured
    #[arg(long)]
    pub prompt: bool,
}

/// Execute the setup command
pub async fn execute(args: &SetupArgs, config: AppConfig) -> Result<(), AppError> {
    let store = super::connect_store(&config).await?;
    let service = SetupService::new(store, Arc::new(config.auth.clone()));

    if service.is_initialized().await? {
        output::print_warning("Setup has already been performed; nothing to do.");
        return Ok(());
    }

    let prompted = if args.prompt || config.auth.superadmin_password.is_none() {
        let password = dialoguer::Password::new()
            .with_prompt(format!("Password for {}", config.auth.superadmin_email))
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
        Some(password)
    } else {
        None
    };

    let (tenant, user) = service.initialize(prompted.as_deref()).await?;
    output::print_success(&format!(
        "Created tenant '{}' ({}) and superadmin {} ({})",
        tenant.name, tenant.id, user.email, user.id
    ));
    Ok(())
}
