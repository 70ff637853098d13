//! Access token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use deltabots_entity::user::{User, UserRole};

/// Identity embedded into an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    /// Account email.
    pub email: String,
    /// Role at issuance time.
    pub role: UserRole,
    /// Owning tenant.
    pub tenant_id: Option<Uuid>,
}

impl From<&User> for TokenIdentity {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            role: user.role,
            tenant_id: user.tenant_id,
        }
    }
}

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the account email.
    pub sub: String,
    /// Role at the time of issuance.
    pub role: UserRole,
    /// Owning tenant at the time of issuance.
    pub tenant_id: Option<Uuid>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token identifier.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the email from the subject claim.
    pub fn email(&self) -> &str {
        &self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`, if representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// A token is expired once `exp` is reached, with no leeway.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}
