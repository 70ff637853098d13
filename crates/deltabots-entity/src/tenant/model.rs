//! Tenant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::TenantStatus;

/// A customer organization owning bots, users, and API keys.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    /// Unique tenant identifier.
    pub id: Uuid,
    /// Unique organization name.
    pub name: String,
    /// Lifecycle status.
    pub status: TenantStatus,
    /// Soft reference to the tenant's primary contact user.
    pub contact_user_id: Option<Uuid>,
    /// When the tenant was created.
    pub created_at: DateTime<Utc>,
    /// When the tenant was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    /// Check if the tenant is active.
    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }
}

/// Data required to insert a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    /// Organization name.
    pub name: String,
    /// Initial status.
    #[serde(default)]
    pub status: TenantStatus,
}
