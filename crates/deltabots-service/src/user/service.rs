//! User creation and tenant-scoped listing.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use deltabots_auth::gateway::normalize_email;
use deltabots_auth::password::{PasswordHasher, PasswordValidator};
use deltabots_auth::{AuthorizationPolicy, Principal};
use deltabots_core::error::AppError;
use deltabots_core::types::PageRequest;
use deltabots_database::CredentialStore;
use deltabots_entity::user::{CreateUser, User, UserRole};

/// Input for creating a user with a plaintext password.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Requested role.
    pub role: UserRole,
    /// Owning tenant. Required for client admins.
    pub tenant_id: Option<Uuid>,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("tenant_id", &self.tenant_id)
            .finish_non_exhaustive()
    }
}

/// Handles user operations.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn CredentialStore>,
    policy: AuthorizationPolicy,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        policy: AuthorizationPolicy,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            store,
            policy,
            hasher: PasswordHasher::new(),
            validator,
        }
    }

    /// Returns the user record behind the principal.
    pub async fn current(&self, principal: &Principal) -> Result<User, AppError> {
        self.store
            .find_user_by_id(principal.id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates a user.
    ///
    /// A superadmin may create any user. A client admin may only create
    /// client admins inside its own tenant.
    pub async fn create(&self, principal: &Principal, data: NewUser) -> Result<User, AppError> {
        if data.role.is_superadmin() {
            self.policy.require_superadmin(principal)?;
        }
        if data.role == UserRole::ClientAdmin && data.tenant_id.is_none() {
            return Err(AppError::validation("A client_admin user requires a tenant_id"));
        }

        if let Some(tenant_id) = data.tenant_id {
            self.store
                .find_tenant_by_id(tenant_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Tenant {tenant_id} not found")))?;
            self.policy.require_tenant_access(principal, tenant_id)?;
        }

        let email = normalize_email(&data.email);
        if email.is_empty() {
            return Err(AppError::validation("Email must not be empty"));
        }
        self.validator.validate(&data.password)?;

        let record = CreateUser {
            name: data.name.trim().to_string(),
            email: email.to_string(),
            password_hash: self.hasher.hash_password(&data.password)?,
            role: data.role,
            tenant_id: data.tenant_id,
        };

        // The first client admin of a tenant becomes its contact, which is
        // the identity tenant API keys act as.
        let (user, claimed) = if record.role == UserRole::ClientAdmin {
            self.store.create_user_claiming_contact(&record).await?
        } else {
            (self.store.create_user(&record).await?, false)
        };

        info!(user_id = %user.id, role = %user.role, created_by = %principal.id, "User created");
        if claimed {
            info!(tenant_id = ?user.tenant_id, user_id = %user.id, "Tenant contact assigned");
        }

        Ok(user)
    }

    /// Lists the users of a tenant, checking existence before ownership.
    pub async fn list_by_tenant(
        &self,
        principal: &Principal,
        tenant_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, AppError> {
        self.store
            .find_tenant_by_id(tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tenant {tenant_id} not found")))?;
        self.policy.require_tenant_access(principal, tenant_id)?;

        self.store.list_users_by_tenant(tenant_id, page.normalized()).await
    }
}
