//! Tenant ownership authorization.
//!
//! A superadmin may access everything. A client admin may access only
//! resources whose tenant equals its own, and nothing at all when it has no
//! tenant. There is no finer-grained ACL.

use uuid::Uuid;

use deltabots_core::error::AppError;
use deltabots_entity::bot::RpaBot;

use crate::principal::Principal;

/// Decides whether a principal may act on a tenant-owned resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationPolicy;

impl AuthorizationPolicy {
    /// Creates the policy.
    pub fn new() -> Self {
        Self
    }

    /// Whether `principal` may access resources of `tenant_id`.
    pub fn can_access_tenant(&self, principal: &Principal, tenant_id: Uuid) -> bool {
        principal.is_superadmin() || principal.tenant_id == Some(tenant_id)
    }

    /// Whether `principal` may access `bot`.
    pub fn can_access_bot(&self, principal: &Principal, bot: &RpaBot) -> bool {
        self.can_access_tenant(principal, bot.tenant_id)
    }

    /// Returns `Err(Forbidden)` unless the tenant is accessible.
    pub fn require_tenant_access(&self, principal: &Principal, tenant_id: Uuid) -> Result<(), AppError> {
        if self.can_access_tenant(principal, tenant_id) {
            Ok(())
        } else {
            tracing::debug!(principal = %principal.id, tenant = %tenant_id, "Tenant access denied");
            Err(AppError::forbidden("Not allowed to access this tenant"))
        }
    }

    /// Returns `Err(Forbidden)` unless the bot is accessible.
    pub fn require_bot_access(&self, principal: &Principal, bot: &RpaBot) -> Result<(), AppError> {
        if self.can_access_bot(principal, bot) {
            Ok(())
        } else {
            tracing::debug!(principal = %principal.id, bot = %bot.code, "Bot access denied");
            Err(AppError::forbidden("Not allowed to access this bot"))
        }
    }

    /// Returns `Err(Forbidden)` unless the principal is a superadmin.
    pub fn require_superadmin(&self, principal: &Principal) -> Result<(), AppError> {
        if principal.is_superadmin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Superadmin role required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use deltabots_entity::user::UserRole;

    use super::*;

    fn principal(role: UserRole, tenant_id: Option<Uuid>) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            email: "p@x.com".to_string(),
            role,
            tenant_id,
            is_active: true,
        }
    }

    fn bot(tenant_id: Uuid) -> RpaBot {
        RpaBot {
            id: Uuid::new_v4(),
            tenant_id,
            code: "BOT-1".to_string(),
            description: None,
            system_target: None,
            status: "Deployed".to_string(),
            last_successful_run_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_superadmin_accesses_every_bot() {
        let policy = AuthorizationPolicy::new();
        let with_tenant = principal(UserRole::Superadmin, Some(Uuid::new_v4()));
        let global = principal(UserRole::Superadmin, None);
        for _ in 0..5 {
            let b = bot(Uuid::new_v4());
            assert!(policy.can_access_bot(&with_tenant, &b));
            assert!(policy.can_access_bot(&global, &b));
        }
    }

    #[test]
    fn test_client_admin_only_owns_its_tenant() {
        let policy = AuthorizationPolicy::new();
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        let admin = principal(UserRole::ClientAdmin, Some(own));

        assert!(policy.can_access_bot(&admin, &bot(own)));
        assert!(!policy.can_access_bot(&admin, &bot(other)));
        assert!(policy.can_access_tenant(&admin, own));
        assert!(!policy.can_access_tenant(&admin, other));
        assert!(policy.require_bot_access(&admin, &bot(other)).is_err());
    }

    #[test]
    fn test_client_admin_without_tenant_accesses_nothing() {
        let policy = AuthorizationPolicy::new();
        let orphan = principal(UserRole::ClientAdmin, None);
        assert!(!policy.can_access_tenant(&orphan, Uuid::new_v4()));
        assert!(!policy.can_access_bot(&orphan, &bot(Uuid::new_v4())));
        assert!(policy.require_superadmin(&orphan).is_err());
    }
}
