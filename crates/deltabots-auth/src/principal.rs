//! The verified identity attached to a request.

use serde::Serialize;
use uuid::Uuid;

use deltabots_entity::user::{User, UserRole};

/// An authenticated caller. Built per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// Id of the backing user record.
    pub id: Uuid,
    /// Account email.
    pub email: String,
    /// Effective role.
    pub role: UserRole,
    /// Tenant the caller is scoped to, `None` only for a global superadmin.
    pub tenant_id: Option<Uuid>,
    /// Whether the backing account is active.
    pub is_active: bool,
}

impl Principal {
    /// Whether this principal has unrestricted access.
    pub fn is_superadmin(&self) -> bool {
        self.role.is_superadmin()
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            tenant_id: user.tenant_id,
            is_active: user.is_active,
        }
    }
}
