//! Creates the internal tenant and its superadmin exactly once.

use std::sync::Arc;

use tracing::info;

use deltabots_auth::password::{PasswordHasher, PasswordValidator};
use deltabots_auth::gateway::normalize_email;
use deltabots_core::config::AuthConfig;
use deltabots_core::error::AppError;
use deltabots_database::CredentialStore;
use deltabots_entity::tenant::{CreateTenant, Tenant, TenantStatus};
use deltabots_entity::user::{CreateUser, User, UserRole};

/// Name of the tenant created by setup.
pub const INTERNAL_TENANT_NAME: &str = "Deltabots Internal";

/// Display name of the bootstrap superadmin.
const SUPERADMIN_NAME: &str = "Super Admin";

/// Runs the one-time setup flow.
#[derive(Clone)]
pub struct SetupService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    config: Arc<AuthConfig>,
}

impl std::fmt::Debug for SetupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetupService").finish_non_exhaustive()
    }
}

impl SetupService {
    /// Creates a new setup service.
    pub fn new(store: Arc<dyn CredentialStore>, config: Arc<AuthConfig>) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(&config),
            config,
        }
    }

    /// Whether setup has already been performed.
    pub async fn is_initialized(&self) -> Result<bool, AppError> {
        Ok(self.store.count_tenants().await? > 0)
    }

    /// Creates the internal tenant, the superadmin, and the contact link
    /// in one atomic step.
    ///
    /// `password` overrides the configured superadmin password. Fails with
    /// `Conflict` when any tenant already exists.
    pub async fn initialize(&self, password: Option<&str>) -> Result<(Tenant, User), AppError> {
        if self.is_initialized().await? {
            return Err(AppError::conflict(
                "Setup has already been performed: tenants exist",
            ));
        }

        let password = password
            .or(self.config.superadmin_password.as_deref())
            .ok_or_else(|| AppError::configuration("auth.superadmin_password is not configured"))?;
        self.validator.validate(password)?;

        let tenant = CreateTenant {
            name: INTERNAL_TENANT_NAME.to_string(),
            status: TenantStatus::Active,
        };
        let admin = CreateUser {
            name: SUPERADMIN_NAME.to_string(),
            email: normalize_email(&self.config.superadmin_email).to_string(),
            password_hash: self.hasher.hash_password(password)?,
            role: UserRole::Superadmin,
            tenant_id: None,
        };

        // The store re-checks emptiness under its own lock.
        let (tenant, user) = self.store.bootstrap(&tenant, &admin).await?;
        info!(tenant_id = %tenant.id, user_id = %user.id, "Initial setup completed");

        Ok((tenant, user))
    }
}
