//! API key model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A long-lived credential usable instead of a password login.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApiKey {
    /// Unique key identifier.
    pub id: Uuid,
    /// The secret value. Never serialized into responses.
    #[serde(skip_serializing, default)]
    pub key_value: String,
    /// Owning tenant; cleared when the tenant is deleted.
    pub tenant_id: Option<Uuid>,
    /// What the key is used for.
    pub purpose: String,
    /// Optional hard expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the key has been revoked.
    pub is_active: bool,
    /// When the key was created.
    pub created_at: DateTime<Utc>,
    /// When the key was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ApiKey {
    /// Whether the key is active and not expired at `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.is_none_or(|exp| exp > now)
    }
}

/// Data required to insert an API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApiKey {
    /// Generated secret value.
    pub key_value: String,
    /// Owning tenant.
    pub tenant_id: Option<Uuid>,
    /// Purpose label.
    pub purpose: String,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}
