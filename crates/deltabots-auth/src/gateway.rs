//! Authentication gateway: turns a presented credential into a [`Principal`].
//!
//! Each protected operation declares exactly one [`AuthScheme`]. There is no
//! fallback from one scheme to another within a request.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use deltabots_core::config::AuthConfig;
use deltabots_core::error::AppError;
use deltabots_database::CredentialStore;
use deltabots_entity::user::{User, UserRole};

use crate::api_key::ApiKeyVerifier;
use crate::password::PasswordHasher;
use crate::principal::Principal;
use crate::token::{TokenIdentity, TokenIssuer, TokenVerifier};

/// How a protected operation expects its caller to authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthScheme {
    /// A key in the configured API key header.
    ApiKey,
    /// A signed access token in `Authorization: Bearer`.
    BearerToken,
}

/// Response body of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// Signed access token.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

impl AccessToken {
    fn bearer(token: String) -> Self {
        Self {
            access_token: token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Single entry point for authenticating requests.
#[derive(Clone)]
pub struct AuthGateway {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    api_keys: ApiKeyVerifier,
    /// Normalized email of the account the superadmin key acts as.
    superadmin_email: String,
    /// Hash verified when the login email is unknown, so that unknown and
    /// known accounts take comparable time.
    decoy_hash: Arc<str>,
}

impl std::fmt::Debug for AuthGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGateway")
            .field("issuer", &self.issuer)
            .field("verifier", &self.verifier)
            .field("superadmin_email", &self.superadmin_email)
            .finish()
    }
}

impl AuthGateway {
    /// Builds the gateway from immutable configuration and the store.
    pub fn new(config: &AuthConfig, store: Arc<dyn CredentialStore>) -> Result<Self, AppError> {
        let hasher = PasswordHasher::new();
        let decoy_hash = hasher.hash_password("decoy-password-for-unknown-accounts")?;

        Ok(Self {
            issuer: TokenIssuer::new(config)?,
            verifier: TokenVerifier::new(config)?,
            api_keys: ApiKeyVerifier::new(config, store.clone()),
            superadmin_email: normalize_email(&config.superadmin_email).to_string(),
            decoy_hash: decoy_hash.into(),
            hasher,
            store,
        })
    }

    /// Authenticates `credential` with the given scheme.
    pub async fn authenticate(
        &self,
        scheme: AuthScheme,
        credential: Option<&str>,
    ) -> Result<Principal, AppError> {
        match scheme {
            AuthScheme::ApiKey => self.authenticate_api_key(credential).await,
            AuthScheme::BearerToken => self.authenticate_bearer(credential).await,
        }
    }

    /// API key scheme.
    ///
    /// The superadmin key is tried first; it acts as the configured
    /// superadmin account, which must exist, be active, and hold the
    /// superadmin role. Any other key is resolved as a tenant key and acts
    /// as that tenant's active contact user with the client admin role.
    pub async fn authenticate_api_key(&self, presented: Option<&str>) -> Result<Principal, AppError> {
        let presented = present(presented)?;

        if self.api_keys.verify_superadmin_key(presented) {
            let user = self.store.find_user_by_email(&self.superadmin_email).await?;
            return match user {
                Some(user) if user.is_superadmin() && user.is_active => {
                    tracing::debug!(user_id = %user.id, "Authenticated with superadmin key");
                    Ok(Principal::from(&user))
                }
                _ => {
                    tracing::debug!("Superadmin key matched but no usable superadmin account");
                    Err(AppError::invalid_credentials())
                }
            };
        }

        let tenant_id = self.api_keys.resolve_tenant_key(presented).await?;
        let contact = match self.store.find_tenant_by_id(tenant_id).await? {
            Some(tenant) if tenant.is_active() => match tenant.contact_user_id {
                Some(user_id) => self.store.find_user_by_id(user_id).await?,
                None => None,
            },
            _ => None,
        };

        match contact.filter(|user| user.is_active) {
            Some(user) => {
                tracing::debug!(tenant_id = %tenant_id, user_id = %user.id, "Authenticated with tenant key");
                Ok(Principal {
                    role: UserRole::ClientAdmin,
                    tenant_id: Some(tenant_id),
                    ..Principal::from(&user)
                })
            }
            None => {
                tracing::debug!(tenant_id = %tenant_id, "Tenant key has no usable contact");
                Err(AppError::invalid_credentials())
            }
        }
    }

    /// Bearer token scheme.
    pub async fn authenticate_bearer(&self, token: Option<&str>) -> Result<Principal, AppError> {
        let claims = self.verifier.verify(present(token)?)?;

        let user = self
            .store
            .find_user_by_email(claims.email())
            .await?
            .ok_or_else(AppError::invalid_credentials)?;
        ensure_active(&user)?;

        Ok(Principal::from(&user))
    }

    /// Password login. The only operation that produces a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AppError> {
        let email = normalize_email(email);
        let Some(user) = self.store.find_user_by_email(email).await? else {
            let _ = self.hasher.verify_password(password, &self.decoy_hash);
            tracing::debug!("Login rejected: unknown account");
            return Err(AppError::invalid_credentials());
        };

        if !self.hasher.verify_password(password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::invalid_credentials());
        }
        ensure_active(&user)?;

        let issued = self.issuer.issue(&TokenIdentity::from(&user), None)?;
        tracing::info!(user_id = %user.id, role = %user.role, "Login successful");

        Ok(AccessToken::bearer(issued.token))
    }

    /// The issuer, for callers that mint tokens outside of login (tests, tooling).
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }
}

/// Emails are compared exactly after trimming surrounding whitespace.
pub fn normalize_email(email: &str) -> &str {
    email.trim()
}

fn present(credential: Option<&str>) -> Result<&str, AppError> {
    match credential.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::authentication("Missing credentials")),
    }
}

fn ensure_active(user: &User) -> Result<(), AppError> {
    if user.is_active {
        Ok(())
    } else {
        tracing::debug!(user_id = %user.id, "Rejected inactive account");
        Err(AppError::inactive_account())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use deltabots_core::error::ErrorKind;
    use deltabots_database::MemoryStore;
    use deltabots_entity::tenant::{CreateTenant, TenantStatus};
    use deltabots_entity::user::CreateUser;

    use super::*;
    use crate::token::test_config;

    async fn seeded() -> (AuthGateway, MemoryStore, User) {
        let store = MemoryStore::new();
        let hash = PasswordHasher::new().hash_password("Secret123").unwrap();
        let (_, admin) = store
            .bootstrap(
                &CreateTenant {
                    name: "Deltabots Internal".to_string(),
                    status: TenantStatus::Active,
                },
                &CreateUser {
                    name: "Admin".to_string(),
                    email: "admin@deltabots.com.br".to_string(),
                    password_hash: hash,
                    role: UserRole::Superadmin,
                    tenant_id: None,
                },
            )
            .await
            .unwrap();
        let gateway = AuthGateway::new(&test_config(), Arc::new(store.clone())).unwrap();
        (gateway, store, admin)
    }

    #[tokio::test]
    async fn test_login_then_bearer() {
        let (gateway, _, admin) = seeded().await;
        let token = gateway.login(" admin@deltabots.com.br ", "Secret123").await.unwrap();
        assert_eq!(token.token_type, "bearer");

        let principal = gateway
            .authenticate(AuthScheme::BearerToken, Some(&token.access_token))
            .await
            .unwrap();
        assert_eq!(principal.id, admin.id);
        assert!(principal.is_superadmin());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (gateway, _, _) = seeded().await;
        let wrong = gateway.login("admin@deltabots.com.br", "nope").await.unwrap_err();
        let unknown = gateway.login("ghost@x.com", "Secret123").await.unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Authentication);
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_inactive_account() {
        let (gateway, store, admin) = seeded().await;
        let token = gateway.login("admin@deltabots.com.br", "Secret123").await.unwrap();
        store.set_user_active(admin.id, false).await;

        let err = gateway.login("admin@deltabots.com.br", "Secret123").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InactiveAccount);
        let err = gateway.authenticate_bearer(Some(&token.access_token)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InactiveAccount);
        let err = gateway
            .authenticate_api_key(Some("unit-test-superadmin-key"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_superadmin_key() {
        let (gateway, _, admin) = seeded().await;
        let principal = gateway
            .authenticate(AuthScheme::ApiKey, Some("unit-test-superadmin-key\n"))
            .await
            .unwrap();
        assert_eq!(principal.id, admin.id);

        let err = gateway.authenticate(AuthScheme::ApiKey, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        let err = gateway
            .authenticate(AuthScheme::ApiKey, Some("wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_no_fallback_between_schemes() {
        let (gateway, _, _) = seeded().await;
        let token = gateway.login("admin@deltabots.com.br", "Secret123").await.unwrap();
        assert!(gateway
            .authenticate(AuthScheme::ApiKey, Some(&token.access_token))
            .await
            .is_err());
        assert!(gateway
            .authenticate(AuthScheme::BearerToken, Some("unit-test-superadmin-key"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let (gateway, _, admin) = seeded().await;
        let issued = gateway
            .issuer()
            .issue(&TokenIdentity::from(&admin), Some(Duration::zero()))
            .unwrap();
        let err = gateway.authenticate_bearer(Some(&issued.token)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
