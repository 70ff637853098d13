//! Tenant creation, lookup, listing, and deletion.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use deltabots_auth::{AuthorizationPolicy, Principal};
use deltabots_core::error::AppError;
use deltabots_core::types::PageRequest;
use deltabots_database::CredentialStore;
use deltabots_entity::tenant::{CreateTenant, Tenant};

/// Handles tenant operations.
#[derive(Clone)]
pub struct TenantService {
    store: Arc<dyn CredentialStore>,
    policy: AuthorizationPolicy,
}

impl TenantService {
    /// Creates a new tenant service.
    pub fn new(store: Arc<dyn CredentialStore>, policy: AuthorizationPolicy) -> Self {
        Self { store, policy }
    }

    /// Creates a tenant. Superadmin only.
    pub async fn create(&self, principal: &Principal, data: CreateTenant) -> Result<Tenant, AppError> {
        self.policy.require_superadmin(principal)?;

        let name = data.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Tenant name must not be empty"));
        }

        let tenant = self
            .store
            .create_tenant(&CreateTenant {
                name: name.to_string(),
                status: data.status,
            })
            .await?;

        info!(tenant_id = %tenant.id, created_by = %principal.id, "Tenant created");
        Ok(tenant)
    }

    /// Gets a tenant, checking existence before ownership.
    pub async fn get(&self, principal: &Principal, id: Uuid) -> Result<Tenant, AppError> {
        let tenant = self
            .store
            .find_tenant_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tenant {id} not found")))?;

        self.policy.require_tenant_access(principal, tenant.id)?;
        Ok(tenant)
    }

    /// Lists the tenants visible to the principal.
    ///
    /// A client admin sees at most its own tenant.
    pub async fn list(&self, principal: &Principal, page: PageRequest) -> Result<Vec<Tenant>, AppError> {
        if principal.is_superadmin() {
            return self.store.list_tenants(page.normalized()).await;
        }

        let Some(own) = principal.tenant_id else {
            return Ok(Vec::new());
        };
        if page.skip > 0 {
            return Ok(Vec::new());
        }
        Ok(self.store.find_tenant_by_id(own).await?.into_iter().collect())
    }

    /// Deletes a tenant. Superadmin only.
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        self.policy.require_superadmin(principal)?;

        if !self.store.delete_tenant(id).await? {
            return Err(AppError::not_found(format!("Tenant {id} not found")));
        }

        info!(tenant_id = %id, deleted_by = %principal.id, "Tenant deleted");
        Ok(())
    }
}
