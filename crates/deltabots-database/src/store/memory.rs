//! In-memory credential store using a Tokio lock for single-node use.
//!
//! Enforces the same uniqueness and referential rules as the PostgreSQL
//! schema so the services behave identically against either backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use deltabots_core::error::AppError;
use deltabots_core::result::AppResult;
use deltabots_core::types::PageRequest;
use deltabots_entity::api_key::{ApiKey, CreateApiKey};
use deltabots_entity::bot::model::DEFAULT_BOT_STATUS;
use deltabots_entity::bot::{CreateBot, RpaBot};
use deltabots_entity::tenant::{CreateTenant, Tenant};
use deltabots_entity::user::{CreateUser, User};

use super::CredentialStore;

#[derive(Debug, Default)]
struct Tables {
    tenants: HashMap<Uuid, Tenant>,
    users: HashMap<Uuid, User>,
    bots: HashMap<Uuid, RpaBot>,
    api_keys: HashMap<Uuid, ApiKey>,
}

impl Tables {
    fn insert_tenant(&mut self, data: &CreateTenant) -> AppResult<Tenant> {
        if self.tenants.values().any(|t| t.name == data.name) {
            return Err(AppError::conflict(format!(
                "Tenant name '{}' already exists",
                data.name
            )));
        }
        let now = Utc::now();
        let tenant = Tenant {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            status: data.status,
            contact_user_id: None,
            created_at: now,
            updated_at: now,
        };
        self.tenants.insert(tenant.id, tenant.clone());
        Ok(tenant)
    }

    fn insert_user(&mut self, data: &CreateUser) -> AppResult<User> {
        if data.password_hash.is_empty() {
            return Err(AppError::validation("Password hash must not be empty"));
        }
        if self.users.values().any(|u| u.email == data.email) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }
        if let Some(tenant_id) = data.tenant_id {
            if !self.tenants.contains_key(&tenant_id) {
                return Err(AppError::conflict("Referenced tenant does not exist"));
            }
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            tenant_id: data.tenant_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn set_contact(&mut self, tenant_id: Uuid, user_id: Uuid) -> AppResult<Option<Tenant>> {
        if self
            .tenants
            .values()
            .any(|t| t.id != tenant_id && t.contact_user_id == Some(user_id))
        {
            return Err(AppError::conflict("User is already a tenant contact"));
        }
        Ok(self.tenants.get_mut(&tenant_id).map(|tenant| {
            tenant.contact_user_id = Some(user_id);
            tenant.updated_at = Utc::now();
            tenant.clone()
        }))
    }

    fn claim_contact(&mut self, tenant_id: Uuid, user_id: Uuid) -> bool {
        match self.tenants.get_mut(&tenant_id) {
            Some(tenant) if tenant.contact_user_id.is_none() => {
                tenant.contact_user_id = Some(user_id);
                tenant.updated_at = Utc::now();
                true
            }
            _ => false,
        }
    }
}

/// [`CredentialStore`] held entirely in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the active flag of a user. Returns `false` if unknown.
    pub async fn set_user_active(&self, user_id: Uuid, is_active: bool) -> bool {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&user_id) {
            Some(user) => {
                user.is_active = is_active;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

fn window<T: Clone>(mut rows: Vec<T>, page: PageRequest) -> Vec<T> {
    let skip = page.offset() as usize;
    let limit = page.limit() as usize;
    if skip >= rows.len() {
        return Vec::new();
    }
    rows.drain(..skip);
    rows.truncate(limit);
    rows
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn list_users_by_tenant(&self, tenant_id: Uuid, page: PageRequest) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables
            .users
            .values()
            .filter(|u| u.tenant_id == Some(tenant_id))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(window(users, page))
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        self.tables.write().await.insert_user(data)
    }

    async fn find_tenant_by_id(&self, id: Uuid) -> AppResult<Option<Tenant>> {
        Ok(self.tables.read().await.tenants.get(&id).cloned())
    }

    async fn list_tenants(&self, page: PageRequest) -> AppResult<Vec<Tenant>> {
        let tables = self.tables.read().await;
        let mut tenants: Vec<Tenant> = tables.tenants.values().cloned().collect();
        tenants.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(window(tenants, page))
    }

    async fn count_tenants(&self) -> AppResult<u64> {
        Ok(self.tables.read().await.tenants.len() as u64)
    }

    async fn create_tenant(&self, data: &CreateTenant) -> AppResult<Tenant> {
        self.tables.write().await.insert_tenant(data)
    }

    async fn create_user_claiming_contact(&self, data: &CreateUser) -> AppResult<(User, bool)> {
        let mut tables = self.tables.write().await;
        let user = tables.insert_user(data)?;
        let claimed = match user.tenant_id {
            Some(tenant_id) => tables.claim_contact(tenant_id, user.id),
            None => false,
        };
        Ok((user, claimed))
    }

    async fn delete_tenant(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.tenants.contains_key(&id) {
            return Ok(false);
        }
        if tables.users.values().any(|u| u.tenant_id == Some(id)) {
            return Err(AppError::conflict("Tenant still has users"));
        }
        tables.tenants.remove(&id);
        tables.bots.retain(|_, bot| bot.tenant_id != id);
        for key in tables.api_keys.values_mut() {
            if key.tenant_id == Some(id) {
                key.tenant_id = None;
            }
        }
        Ok(true)
    }

    async fn bootstrap(&self, tenant: &CreateTenant, admin: &CreateUser) -> AppResult<(Tenant, User)> {
        let mut tables = self.tables.write().await;
        if !tables.tenants.is_empty() {
            return Err(AppError::conflict(
                "Setup has already been performed: tenants exist",
            ));
        }

        // Work on a scratch copy so a failed step leaves nothing behind.
        let mut scratch = Tables {
            tenants: tables.tenants.clone(),
            users: tables.users.clone(),
            bots: tables.bots.clone(),
            api_keys: tables.api_keys.clone(),
        };
        let created_tenant = scratch.insert_tenant(tenant)?;
        let created_user = scratch.insert_user(&CreateUser {
            tenant_id: Some(created_tenant.id),
            ..admin.clone()
        })?;
        let updated_tenant = scratch
            .set_contact(created_tenant.id, created_user.id)?
            .ok_or_else(|| AppError::internal("Tenant vanished during setup"))?;

        *tables = scratch;
        Ok((updated_tenant, created_user))
    }

    async fn find_bot_by_code(&self, code: &str) -> AppResult<Option<RpaBot>> {
        let tables = self.tables.read().await;
        Ok(tables.bots.values().find(|b| b.code == code).cloned())
    }

    async fn list_bots_by_tenant(&self, tenant_id: Uuid, page: PageRequest) -> AppResult<Vec<RpaBot>> {
        let tables = self.tables.read().await;
        let mut bots: Vec<RpaBot> = tables
            .bots
            .values()
            .filter(|b| b.tenant_id == tenant_id)
            .cloned()
            .collect();
        bots.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(window(bots, page))
    }

    async fn create_bot(&self, data: &CreateBot) -> AppResult<RpaBot> {
        let mut tables = self.tables.write().await;
        if !tables.tenants.contains_key(&data.tenant_id) {
            return Err(AppError::conflict("Referenced tenant does not exist"));
        }
        if tables.bots.values().any(|b| b.code == data.code) {
            return Err(AppError::conflict(format!(
                "Bot code '{}' already exists",
                data.code
            )));
        }
        let now = Utc::now();
        let bot = RpaBot {
            id: Uuid::new_v4(),
            tenant_id: data.tenant_id,
            code: data.code.clone(),
            description: data.description.clone(),
            system_target: data.system_target.clone(),
            status: data
                .status
                .clone()
                .unwrap_or_else(|| DEFAULT_BOT_STATUS.to_string()),
            last_successful_run_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.bots.insert(bot.id, bot.clone());
        Ok(bot)
    }

    async fn find_api_key_by_value(&self, key_value: &str) -> AppResult<Option<ApiKey>> {
        let tables = self.tables.read().await;
        Ok(tables
            .api_keys
            .values()
            .find(|k| k.key_value == key_value)
            .cloned())
    }

    async fn create_api_key(&self, data: &CreateApiKey) -> AppResult<ApiKey> {
        let mut tables = self.tables.write().await;
        if tables.api_keys.values().any(|k| k.key_value == data.key_value) {
            return Err(AppError::conflict("API key value already exists"));
        }
        if let Some(tenant_id) = data.tenant_id {
            if !tables.tenants.contains_key(&tenant_id) {
                return Err(AppError::conflict("Referenced tenant does not exist"));
            }
        }
        let now = Utc::now();
        let key = ApiKey {
            id: Uuid::new_v4(),
            key_value: data.key_value.clone(),
            tenant_id: data.tenant_id,
            purpose: data.purpose.clone(),
            expires_at: data.expires_at,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.api_keys.insert(key.id, key.clone());
        Ok(key)
    }

    async fn deactivate_api_key(&self, id: Uuid) -> AppResult<Option<ApiKey>> {
        let mut tables = self.tables.write().await;
        Ok(tables.api_keys.get_mut(&id).map(|key| {
            key.is_active = false;
            key.updated_at = Utc::now();
            key.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deltabots_core::error::ErrorKind;
    use deltabots_entity::tenant::TenantStatus;
    use deltabots_entity::user::UserRole;

    fn tenant(name: &str) -> CreateTenant {
        CreateTenant {
            name: name.to_string(),
            status: TenantStatus::Active,
        }
    }

    fn user(email: &str, tenant_id: Option<Uuid>) -> CreateUser {
        CreateUser {
            name: "Someone".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: UserRole::ClientAdmin,
            tenant_id,
        }
    }

    #[tokio::test]
    async fn test_bootstrap_is_all_or_nothing() {
        let store = MemoryStore::new();
        let mut admin = user("admin@x.com", None);
        admin.password_hash = String::new();

        let err = store.bootstrap(&tenant("Internal"), &admin).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(store.count_tenants().await.unwrap(), 0);

        admin.password_hash = "$argon2id$stub".to_string();
        let (t, u) = store.bootstrap(&tenant("Internal"), &admin).await.unwrap();
        assert_eq!(t.contact_user_id, Some(u.id));
        assert_eq!(u.tenant_id, Some(t.id));

        let err = store.bootstrap(&tenant("Other"), &user("b@x.com", None)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(store.count_tenants().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unique_constraints() {
        let store = MemoryStore::new();
        let t = store.create_tenant(&tenant("Acme")).await.unwrap();
        assert_eq!(
            store.create_tenant(&tenant("Acme")).await.unwrap_err().kind,
            ErrorKind::Conflict
        );
        store.create_user(&user("a@acme.com", Some(t.id))).await.unwrap();
        assert_eq!(
            store.create_user(&user("a@acme.com", Some(t.id))).await.unwrap_err().kind,
            ErrorKind::Conflict
        );
    }

    #[tokio::test]
    async fn test_delete_tenant_rules() {
        let store = MemoryStore::new();
        let t = store.create_tenant(&tenant("Acme")).await.unwrap();
        let bot = store
            .create_bot(&CreateBot {
                tenant_id: t.id,
                code: "BOT-1".to_string(),
                description: None,
                system_target: None,
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(bot.status, DEFAULT_BOT_STATUS);
        let key = store
            .create_api_key(&CreateApiKey {
                key_value: "secret-value".to_string(),
                tenant_id: Some(t.id),
                purpose: "ci".to_string(),
                expires_at: None,
            })
            .await
            .unwrap();

        let u = store.create_user(&user("a@acme.com", Some(t.id))).await.unwrap();
        assert_eq!(store.delete_tenant(t.id).await.unwrap_err().kind, ErrorKind::Conflict);

        // Restrict holds until the user is gone.
        store.tables.write().await.users.remove(&u.id);
        assert!(store.delete_tenant(t.id).await.unwrap());
        assert!(store.find_bot_by_code("BOT-1").await.unwrap().is_none());
        let detached = store.find_api_key_by_value(&key.key_value).await.unwrap().unwrap();
        assert_eq!(detached.tenant_id, None);
        assert!(!store.delete_tenant(t.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_window() {
        let store = MemoryStore::new();
        let t = store.create_tenant(&tenant("Acme")).await.unwrap();
        for i in 0..5 {
            store
                .create_bot(&CreateBot {
                    tenant_id: t.id,
                    code: format!("BOT-{i}"),
                    description: None,
                    system_target: None,
                    status: Some("Paused".to_string()),
                })
                .await
                .unwrap();
        }
        let page = store.list_bots_by_tenant(t.id, PageRequest::new(1, 2)).await.unwrap();
        let codes: Vec<_> = page.iter().map(|b| b.code.as_str()).collect();
        assert_eq!(codes, vec!["BOT-1", "BOT-2"]);
        assert!(store
            .list_bots_by_tenant(t.id, PageRequest::new(10, 2))
            .await
            .unwrap()
            .is_empty());
    }
}
