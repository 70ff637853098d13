//! The credential store contract consumed by the authentication core and
//! the management services.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgCredentialStore;

use async_trait::async_trait;
use uuid::Uuid;

use deltabots_core::result::AppResult;
use deltabots_core::types::PageRequest;
use deltabots_entity::api_key::{ApiKey, CreateApiKey};
use deltabots_entity::bot::{CreateBot, RpaBot};
use deltabots_entity::tenant::{CreateTenant, Tenant};
use deltabots_entity::user::{CreateUser, User};

/// Record-level access to tenants, users, bots, and API keys.
///
/// Implementations enforce the same constraints as the relational schema:
/// unique tenant names, user emails, bot codes and key values; user →
/// tenant `RESTRICT`; bot → tenant `CASCADE`; key → tenant `SET NULL`.
/// Constraint violations surface as `ErrorKind::Conflict`.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Verify the store is reachable.
    async fn health_check(&self) -> AppResult<()>;

    /// Find a user by exact (already normalized) email.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by id.
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// List the users belonging to a tenant.
    async fn list_users_by_tenant(&self, tenant_id: Uuid, page: PageRequest) -> AppResult<Vec<User>>;

    /// Insert a user, returning the stored row.
    async fn create_user(&self, data: &CreateUser) -> AppResult<User>;

    /// Find a tenant by id.
    async fn find_tenant_by_id(&self, id: Uuid) -> AppResult<Option<Tenant>>;

    /// List all tenants.
    async fn list_tenants(&self, page: PageRequest) -> AppResult<Vec<Tenant>>;

    /// Count all tenants.
    async fn count_tenants(&self) -> AppResult<u64>;

    /// Insert a tenant, returning the stored row.
    async fn create_tenant(&self, data: &CreateTenant) -> AppResult<Tenant>;

    /// Insert a user and, in the same write, make it the contact of its
    /// tenant if that tenant has none yet.
    ///
    /// Returns the stored user and whether the contact was claimed. Of
    /// several concurrent calls for one tenant at most one claims it, and a
    /// failed claim leaves no user behind.
    async fn create_user_claiming_contact(&self, data: &CreateUser) -> AppResult<(User, bool)>;

    /// Delete a tenant, cascading to its bots and detaching its keys.
    ///
    /// Returns `false` when the tenant does not exist and a conflict while
    /// users still belong to it.
    async fn delete_tenant(&self, id: Uuid) -> AppResult<bool>;

    /// Atomically create the first tenant, its admin user, and the contact
    /// back-reference.
    ///
    /// Fails with a conflict when any tenant already exists. Any failure
    /// leaves the store untouched.
    async fn bootstrap(&self, tenant: &CreateTenant, admin: &CreateUser) -> AppResult<(Tenant, User)>;

    /// Find a bot by its unique code.
    async fn find_bot_by_code(&self, code: &str) -> AppResult<Option<RpaBot>>;

    /// List the bots belonging to a tenant.
    async fn list_bots_by_tenant(&self, tenant_id: Uuid, page: PageRequest) -> AppResult<Vec<RpaBot>>;

    /// Register a bot.
    async fn create_bot(&self, data: &CreateBot) -> AppResult<RpaBot>;

    /// Find an API key record by its secret value.
    async fn find_api_key_by_value(&self, key_value: &str) -> AppResult<Option<ApiKey>>;

    /// Insert an API key.
    async fn create_api_key(&self, data: &CreateApiKey) -> AppResult<ApiKey>;

    /// Deactivate an API key, returning the updated row.
    async fn deactivate_api_key(&self, id: Uuid) -> AppResult<Option<ApiKey>>;
}
