//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A stored user account, the credential record behind every principal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email, unique and compared exactly after trimming.
    pub email: String,
    /// Argon2 PHC-format password hash. Never plaintext.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Account role.
    pub role: UserRole,
    /// Owning tenant, `None` only for a globally acting superadmin.
    pub tenant_id: Option<Uuid>,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user holds the superadmin role.
    pub fn is_superadmin(&self) -> bool {
        self.role.is_superadmin()
    }
}

/// Data required to insert a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Login email (already normalized).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Owning tenant.
    pub tenant_id: Option<Uuid>,
}
