//! Bot registration and ownership-checked lookups.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use deltabots_auth::{AuthorizationPolicy, Principal};
use deltabots_core::error::AppError;
use deltabots_core::types::PageRequest;
use deltabots_database::CredentialStore;
use deltabots_entity::bot::{CreateBot, RpaBot};

/// Handles bot operations.
#[derive(Clone)]
pub struct BotService {
    store: Arc<dyn CredentialStore>,
    policy: AuthorizationPolicy,
}

impl BotService {
    /// Creates a new bot service.
    pub fn new(store: Arc<dyn CredentialStore>, policy: AuthorizationPolicy) -> Self {
        Self { store, policy }
    }

    /// Registers a bot for a tenant the principal may access.
    pub async fn create(&self, principal: &Principal, data: CreateBot) -> Result<RpaBot, AppError> {
        self.store
            .find_tenant_by_id(data.tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tenant {} not found", data.tenant_id)))?;
        self.policy.require_tenant_access(principal, data.tenant_id)?;

        let code = data.code.trim();
        if code.is_empty() {
            return Err(AppError::validation("Bot code must not be empty"));
        }

        let bot = self
            .store
            .create_bot(&CreateBot {
                code: code.to_string(),
                ..data
            })
            .await?;

        info!(bot_code = %bot.code, tenant_id = %bot.tenant_id, "Bot registered");
        Ok(bot)
    }

    /// Gets a bot by code: not-found first, then forbidden.
    pub async fn get_by_code(&self, principal: &Principal, code: &str) -> Result<RpaBot, AppError> {
        let bot = self
            .store
            .find_bot_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Bot '{code}' not found")))?;

        self.policy.require_bot_access(principal, &bot)?;
        Ok(bot)
    }

    /// Lists a tenant's bots.
    pub async fn list_by_tenant(
        &self,
        principal: &Principal,
        tenant_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<RpaBot>, AppError> {
        self.store
            .find_tenant_by_id(tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tenant {tenant_id} not found")))?;
        self.policy.require_tenant_access(principal, tenant_id)?;

        self.store.list_bots_by_tenant(tenant_id, page.normalized()).await
    }
}
