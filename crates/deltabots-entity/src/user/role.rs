//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Unrestricted cross-tenant access.
    Superadmin,
    /// Restricted to the resources of its own tenant.
    #[default]
    ClientAdmin,
}

impl UserRole {
    /// Check if this role is the superadmin role.
    pub fn is_superadmin(&self) -> bool {
        matches!(self, Self::Superadmin)
    }

    /// Return the role as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::ClientAdmin => "client_admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = deltabots_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "superadmin" => Ok(Self::Superadmin),
            "client_admin" => Ok(Self::ClientAdmin),
            _ => Err(deltabots_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: superadmin, client_admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("superadmin".parse::<UserRole>().unwrap(), UserRole::Superadmin);
        assert_eq!(
            " client_admin ".parse::<UserRole>().unwrap(),
            UserRole::ClientAdmin
        );
        assert!("admin".parse::<UserRole>().is_err());
        assert!("SUPERADMIN".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&UserRole::ClientAdmin).unwrap(),
            "\"client_admin\""
        );
        assert_eq!(UserRole::default(), UserRole::ClientAdmin);
    }
}
