//! PostgreSQL-backed credential store.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use deltabots_core::error::AppError;
use deltabots_core::result::AppResult;
use deltabots_core::types::PageRequest;
use deltabots_entity::api_key::{ApiKey, CreateApiKey};
use deltabots_entity::bot::{CreateBot, RpaBot};
use deltabots_entity::tenant::{CreateTenant, Tenant};
use deltabots_entity::user::{CreateUser, User};

use crate::repositories::{
    ApiKeyRepository, BotRepository, TenantRepository, UserRepository, map_db_error,
};

use super::CredentialStore;

/// [`CredentialStore`] composed of the per-table repositories.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
    tenants: TenantRepository,
    users: UserRepository,
    bots: BotRepository,
    api_keys: ApiKeyRepository,
}

impl PgCredentialStore {
    /// Create a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            tenants: TenantRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            bots: BotRepository::new(pool.clone()),
            api_keys: ApiKeyRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn health_check(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| map_db_error("Health check failed", e))
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users.find_by_email(email).await
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn list_users_by_tenant(&self, tenant_id: Uuid, page: PageRequest) -> AppResult<Vec<User>> {
        self.users.find_by_tenant(tenant_id, &page).await
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        self.users.create(data).await
    }

    async fn find_tenant_by_id(&self, id: Uuid) -> AppResult<Option<Tenant>> {
        self.tenants.find_by_id(id).await
    }

    async fn list_tenants(&self, page: PageRequest) -> AppResult<Vec<Tenant>> {
        self.tenants.find_all(&page).await
    }

    async fn count_tenants(&self) -> AppResult<u64> {
        self.tenants.count().await
    }

    async fn create_tenant(&self, data: &CreateTenant) -> AppResult<Tenant> {
        self.tenants.create(data).await
    }

    async fn create_user_claiming_contact(&self, data: &CreateUser) -> AppResult<(User, bool)> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("Failed to begin user transaction", e))?;

        // Taken before the insert, whose foreign key check would otherwise
        // share-lock the row and deadlock against a concurrent claim.
        if let Some(tenant_id) = data.tenant_id {
            TenantRepository::lock_row_with(&mut *tx, tenant_id).await?;
        }
        let user = UserRepository::insert_with(&mut *tx, data).await?;
        let claimed = match user.tenant_id {
            Some(tenant_id) => TenantRepository::claim_contact_with(&mut *tx, tenant_id, user.id).await?,
            None => false,
        };

        tx.commit()
            .await
            .map_err(|e| map_db_error("Failed to commit user transaction", e))?;
        Ok((user, claimed))
    }

    async fn delete_tenant(&self, id: Uuid) -> AppResult<bool> {
        self.tenants.delete(id).await
    }

    async fn bootstrap(&self, tenant: &CreateTenant, admin: &CreateUser) -> AppResult<(Tenant, User)> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("Failed to begin setup transaction", e))?;

        // Serialises concurrent setup attempts so only one sees an empty table.
        sqlx::query("LOCK TABLE tenants IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error("Failed to lock tenants table", e))?;

        if TenantRepository::count_with(&mut *tx).await? > 0 {
            return Err(AppError::conflict(
                "Setup has already been performed: tenants exist",
            ));
        }

        let created_tenant = TenantRepository::insert_with(&mut *tx, tenant).await?;
        let admin_data = CreateUser {
            tenant_id: Some(created_tenant.id),
            ..admin.clone()
        };
        let created_user = UserRepository::insert_with(&mut *tx, &admin_data).await?;
        let updated_tenant =
            TenantRepository::set_contact_with(&mut *tx, created_tenant.id, created_user.id)
                .await?
                .ok_or_else(|| AppError::internal("Tenant vanished during setup"))?;

        tx.commit()
            .await
            .map_err(|e| map_db_error("Failed to commit setup transaction", e))?;

        info!(
            tenant_id = %updated_tenant.id,
            user_id = %created_user.id,
            "Bootstrap tenant and superadmin created"
        );
        Ok((updated_tenant, created_user))
    }

    async fn find_bot_by_code(&self, code: &str) -> AppResult<Option<RpaBot>> {
        self.bots.find_by_code(code).await
    }

    async fn list_bots_by_tenant(&self, tenant_id: Uuid, page: PageRequest) -> AppResult<Vec<RpaBot>> {
        self.bots.find_by_tenant(tenant_id, &page).await
    }

    async fn create_bot(&self, data: &CreateBot) -> AppResult<RpaBot> {
        self.bots.create(data).await
    }

    async fn find_api_key_by_value(&self, key_value: &str) -> AppResult<Option<ApiKey>> {
        self.api_keys.find_by_value(key_value).await
    }

    async fn create_api_key(&self, data: &CreateApiKey) -> AppResult<ApiKey> {
        self.api_keys.create(data).await
    }

    async fn deactivate_api_key(&self, id: Uuid) -> AppResult<Option<ApiKey>> {
        self.api_keys.deactivate(id).await
    }
}
