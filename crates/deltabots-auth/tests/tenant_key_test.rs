//! Tenant-scoped API keys resolved through the gateway.

use std::sync::Arc;

use chrono::{Duration, Utc};

use deltabots_auth::{AuthGateway, AuthScheme, AuthorizationPolicy, PasswordHasher};
use deltabots_core::config::AuthConfig;
use deltabots_core::error::ErrorKind;
use deltabots_database::{CredentialStore, MemoryStore};
use deltabots_entity::api_key::CreateApiKey;
use deltabots_entity::bot::CreateBot;
use deltabots_entity::tenant::{CreateTenant, Tenant, TenantStatus};
use deltabots_entity::user::{CreateUser, User, UserRole};

fn config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "tenant-key-test-secret".to_string(),
        superadmin_key: "tenant-key-test-superadmin".to_string(),
        ..AuthConfig::default()
    }
}

async fn tenant_with_contact(store: &MemoryStore, name: &str, status: TenantStatus) -> (Tenant, User) {
    let tenant = store
        .create_tenant(&CreateTenant {
            name: name.to_string(),
            status,
        })
        .await
        .unwrap();
    let (user, claimed) = store
        .create_user_claiming_contact(&CreateUser {
            name: format!("{name} admin"),
            email: format!("admin@{}.com", name.to_lowercase()),
            password_hash: PasswordHasher::new().hash_password("Secret123").unwrap(),
            role: UserRole::ClientAdmin,
            tenant_id: Some(tenant.id),
        })
        .await
        .unwrap();
    assert!(claimed);
    let tenant = store.find_tenant_by_id(tenant.id).await.unwrap().unwrap();
    (tenant, user)
}

async fn key_for(store: &MemoryStore, tenant: &Tenant, value: &str) {
    store
        .create_api_key(&CreateApiKey {
            key_value: value.to_string(),
            tenant_id: Some(tenant.id),
            purpose: "automation".to_string(),
            expires_at: Some(Utc::now() + Duration::days(30)),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn tenant_key_acts_as_contact_with_client_admin_role() {
    let store = MemoryStore::new();
    let (acme, contact) = tenant_with_contact(&store, "Acme", TenantStatus::Active).await;
    let (globex, _) = tenant_with_contact(&store, "Globex", TenantStatus::Active).await;
    key_for(&store, &acme, "acme-key").await;

    let globex_bot = store
        .create_bot(&CreateBot {
            tenant_id: globex.id,
            code: "GLX-1".to_string(),
            description: None,
            system_target: None,
            status: None,
        })
        .await
        .unwrap();

    let gateway = AuthGateway::new(&config(), Arc::new(store.clone())).unwrap();
    let principal = gateway
        .authenticate(AuthScheme::ApiKey, Some("acme-key"))
        .await
        .unwrap();

    assert_eq!(principal.id, contact.id);
    assert_eq!(principal.role, UserRole::ClientAdmin);
    assert_eq!(principal.tenant_id, Some(acme.id));

    let policy = AuthorizationPolicy::new();
    assert!(policy.can_access_tenant(&principal, acme.id));
    assert!(!policy.can_access_bot(&principal, &globex_bot));
}

#[tokio::test]
async fn inactive_tenant_or_contact_invalidates_key() {
    let store = MemoryStore::new();
    let (dormant, _) = tenant_with_contact(&store, "Dormant", TenantStatus::Inactive).await;
    key_for(&store, &dormant, "dormant-key").await;

    let (acme, contact) = tenant_with_contact(&store, "Acme", TenantStatus::Active).await;
    key_for(&store, &acme, "acme-key").await;
    store.set_user_active(contact.id, false).await;

    let gateway = AuthGateway::new(&config(), Arc::new(store)).unwrap();
    for key in ["dormant-key", "acme-key"] {
        let err = gateway
            .authenticate(AuthScheme::ApiKey, Some(key))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Invalid credentials");
    }
}

#[tokio::test]
async fn tenant_without_contact_invalidates_key() {
    let store = MemoryStore::new();
    let tenant = store
        .create_tenant(&CreateTenant {
            name: "Headless".to_string(),
            status: TenantStatus::Active,
        })
        .await
        .unwrap();
    key_for(&store, &tenant, "headless-key").await;

    let gateway = AuthGateway::new(&config(), Arc::new(store)).unwrap();
    assert!(gateway.authenticate_api_key(Some("headless-key")).await.is_err());
}
