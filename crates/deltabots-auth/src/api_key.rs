//! API key verification.
//!
//! Two kinds of key exist: the single permanent superadmin key from
//! configuration, and tenant-scoped keys stored as records.

use std::sync::Arc;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use deltabots_core::config::AuthConfig;
use deltabots_core::error::AppError;
use deltabots_database::CredentialStore;
use deltabots_entity::api_key::ApiKey;

/// Random bytes in a generated key.
const API_KEY_BYTES: usize = 32;

/// Verifies presented API keys.
#[derive(Clone)]
pub struct ApiKeyVerifier {
    /// SHA-256 of the configured superadmin key.
    superadmin_digest: [u8; 32],
    /// Whether a superadmin key is configured at all.
    superadmin_enabled: bool,
    /// Store holding tenant-scoped keys.
    store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for ApiKeyVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyVerifier")
            .field("superadmin_enabled", &self.superadmin_enabled)
            .finish()
    }
}

impl ApiKeyVerifier {
    /// Creates a verifier for the configured superadmin key and the given store.
    pub fn new(config: &AuthConfig, store: Arc<dyn CredentialStore>) -> Self {
        let key = config.superadmin_key.trim();
        Self {
            superadmin_digest: sha256(key),
            superadmin_enabled: !key.is_empty(),
            store,
        }
    }

    /// Whether `presented` equals the superadmin key.
    ///
    /// Both sides are hashed first so the comparison runs over fixed-length
    /// digests and its timing does not depend on where they differ.
    pub fn verify_superadmin_key(&self, presented: &str) -> bool {
        let presented = sha256(presented.trim());
        self.superadmin_enabled && constant_time_eq(&presented, &self.superadmin_digest)
    }

    /// Resolves a tenant-scoped key to the tenant owning it.
    ///
    /// Unknown, inactive, expired, and detached keys all yield the same
    /// invalid-credentials error. Store failures propagate unchanged.
    pub async fn resolve_tenant_key(&self, presented: &str) -> Result<Uuid, AppError> {
        let presented = presented.trim();
        if presented.is_empty() {
            return Err(AppError::invalid_credentials());
        }

        let record = self.store.find_api_key_by_value(presented).await?;
        match record.as_ref().and_then(usable_tenant) {
            Some(tenant_id) => Ok(tenant_id),
            None => {
                tracing::debug!(
                    known = record.is_some(),
                    "Tenant API key rejected"
                );
                Err(AppError::invalid_credentials())
            }
        }
    }
}

fn usable_tenant(key: &ApiKey) -> Option<Uuid> {
    if key.is_usable_at(Utc::now()) {
        key.tenant_id
    } else {
        None
    }
}

/// Generates a new random key value (43 URL-safe characters).
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn sha256(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use deltabots_core::error::ErrorKind;
    use deltabots_database::MemoryStore;
    use deltabots_entity::api_key::CreateApiKey;
    use deltabots_entity::tenant::{CreateTenant, TenantStatus};

    use super::*;

    fn config(key: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: "s".to_string(),
            superadmin_key: key.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_superadmin_key_compare() {
        let verifier = ApiKeyVerifier::new(&config("perm-key"), Arc::new(MemoryStore::new()));
        assert!(verifier.verify_superadmin_key("perm-key"));
        assert!(verifier.verify_superadmin_key("perm-key\n"));
        assert!(!verifier.verify_superadmin_key("perm-kez"));
        assert!(!verifier.verify_superadmin_key("perm"));
        assert!(!verifier.verify_superadmin_key(""));
    }

    #[test]
    fn test_empty_superadmin_key_never_matches() {
        let verifier = ApiKeyVerifier::new(&config("  "), Arc::new(MemoryStore::new()));
        assert!(!verifier.verify_superadmin_key(""));
        assert!(!verifier.verify_superadmin_key(" "));
    }

    #[test]
    fn test_generated_keys_are_distinct() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[tokio::test]
    async fn test_tenant_key_rejections_are_uniform() {
        let store = MemoryStore::new();
        let tenant = store
            .create_tenant(&CreateTenant {
                name: "Acme".to_string(),
                status: TenantStatus::Active,
            })
            .await
            .unwrap();

        let mk = |value: &str, expires_at: Option<chrono::DateTime<Utc>>| CreateApiKey {
            key_value: value.to_string(),
            tenant_id: Some(tenant.id),
            purpose: "test".to_string(),
            expires_at,
        };
        store.create_api_key(&mk("good", None)).await.unwrap();
        store
            .create_api_key(&mk("expired", Some(Utc::now() - Duration::minutes(1))))
            .await
            .unwrap();
        let inactive = store.create_api_key(&mk("inactive", None)).await.unwrap();
        store.deactivate_api_key(inactive.id).await.unwrap();

        let verifier = ApiKeyVerifier::new(&config("perm-key"), Arc::new(store));
        assert_eq!(verifier.resolve_tenant_key("good").await.unwrap(), tenant.id);

        let mut messages = Vec::new();
        for presented in ["goo", "expired", "inactive", "unknown", ""] {
            let err = verifier.resolve_tenant_key(presented).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
            messages.push(err.to_string());
        }
        messages.dedup();
        assert_eq!(messages.len(), 1);
    }
}
