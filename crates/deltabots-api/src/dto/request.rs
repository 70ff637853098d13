//! Request DTOs.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use deltabots_entity::tenant::TenantStatus;

/// POST /tenants
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTenantRequest {
    /// Unique tenant name.
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    /// Initial status (default `Active`).
    #[serde(default)]
    pub status: TenantStatus,
}

/// POST /users
#[derive(Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Login email.
    #[validate(email, length(max = 150))]
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// `superadmin` or `client_admin` (default).
    #[serde(default)]
    pub role: Option<String>,
    /// Owning tenant.
    pub tenant_id: Option<Uuid>,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("tenant_id", &self.tenant_id)
            .finish_non_exhaustive()
    }
}

/// POST /bots
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBotRequest {
    /// Owning tenant.
    pub tenant_id: Uuid,
    /// Unique external code.
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Automated system.
    #[validate(length(max = 100))]
    pub system_target: Option<String>,
    /// Initial status (default `Deployed`).
    #[validate(length(min = 1, max = 20))]
    pub status: Option<String>,
}

/// POST /api-keys
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApiKeyRequest {
    /// Tenant the key acts for.
    pub tenant_id: Uuid,
    /// Free-text purpose.
    #[validate(length(min = 1, max = 100))]
    pub purpose: String,
    /// Lifetime in days; omitted for a non-expiring key.
    #[validate(range(min = 1, max = 3650))]
    pub expires_in_days: Option<u32>,
}

/// GET /bots/{code}/logs
#[derive(Debug, Clone, Deserialize)]
pub struct LogRangeQuery {
    /// Range start (RFC 3339).
    pub start: DateTime<Utc>,
    /// Range end (RFC 3339).
    pub end: DateTime<Utc>,
}
