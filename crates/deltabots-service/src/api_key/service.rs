//! API key issuing and deactivation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use deltabots_auth::{AuthorizationPolicy, Principal, generate_api_key};
use deltabots_core::error::AppError;
use deltabots_database::CredentialStore;
use deltabots_entity::api_key::{ApiKey, CreateApiKey};

/// Input for issuing a key.
#[derive(Debug, Clone, Deserialize)]
pub struct NewApiKey {
    /// Tenant the key acts for.
    pub tenant_id: Uuid,
    /// Free-text purpose.
    pub purpose: String,
    /// Optional lifetime in days; `None` never expires.
    pub expires_in_days: Option<u32>,
}

/// A newly issued key. The secret value is only ever returned here.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedApiKey {
    /// Stored record (secret omitted on serialization).
    #[serde(flatten)]
    pub record: ApiKey,
    /// The secret key value.
    pub key: String,
}

/// Handles API key operations.
#[derive(Clone)]
pub struct ApiKeyService {
    store: Arc<dyn CredentialStore>,
    policy: AuthorizationPolicy,
}

impl ApiKeyService {
    /// Creates a new API key service.
    pub fn new(store: Arc<dyn CredentialStore>, policy: AuthorizationPolicy) -> Self {
        Self { store, policy }
    }

    /// Issues a random key for a tenant the principal may access.
    pub async fn issue(&self, principal: &Principal, data: NewApiKey) -> Result<IssuedApiKey, AppError> {
        self.store
            .find_tenant_by_id(data.tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tenant {} not found", data.tenant_id)))?;
        self.policy.require_tenant_access(principal, data.tenant_id)?;

        let expires_at = match data.expires_in_days {
            Some(0) => return Err(AppError::validation("expires_in_days must be positive")),
            Some(days) => Some(expiry_after_days(Utc::now(), days)?),
            None => None,
        };

        let key = generate_api_key();
        let record = self
            .store
            .create_api_key(&CreateApiKey {
                key_value: key.clone(),
                tenant_id: Some(data.tenant_id),
                purpose: data.purpose.trim().to_string(),
                expires_at,
            })
            .await?;

        info!(api_key_id = %record.id, tenant_id = %data.tenant_id, "API key issued");
        Ok(IssuedApiKey { record, key })
    }

    /// Deactivates a key. Superadmin only.
    pub async fn deactivate(&self, principal: &Principal, id: Uuid) -> Result<ApiKey, AppError> {
        self.policy.require_superadmin(principal)?;

        let key = self
            .store
            .deactivate_api_key(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("API key {id} not found")))?;

        info!(api_key_id = %id, "API key deactivated");
        Ok(key)
    }
}

fn expiry_after_days(now: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>, AppError> {
    Duration::try_days(i64::from(days))
        .and_then(|d| now.checked_add_signed(d))
        .ok_or_else(|| AppError::validation("expires_in_days is out of range"))
}
