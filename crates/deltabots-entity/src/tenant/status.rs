//! Tenant status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tenant_status")]
pub enum TenantStatus {
    /// Tenant is operating normally.
    #[default]
    Active,
    /// Tenant has been suspended; its API keys stop resolving.
    Inactive,
}

impl TenantStatus {
    /// Return the status as its stored string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TenantStatus {
    type Err = deltabots_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(deltabots_core::AppError::validation(format!(
                "Invalid tenant status: '{s}'. Expected one of: Active, Inactive"
            ))),
        }
    }
}
