//! Store contract tests against a real PostgreSQL database.
//!
//! Skipped unless `DATABASE_URL` points at a disposable database; every
//! test truncates all tables before it runs.

use chrono::{Duration, Utc};
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use deltabots_core::config::DatabaseConfig;
use deltabots_core::error::ErrorKind;
use deltabots_database::migration::run_migrations;
use deltabots_database::{CredentialStore, DatabasePool, PgCredentialStore};
use deltabots_entity::api_key::CreateApiKey;
use deltabots_entity::bot::CreateBot;
use deltabots_entity::tenant::{CreateTenant, Tenant, TenantStatus};
use deltabots_entity::user::{CreateUser, UserRole};

/// Tests share one database, so they run one at a time.
static SERIAL: Mutex<()> = Mutex::const_new(());

struct TestDb {
    store: PgCredentialStore,
    _guard: MutexGuard<'static, ()>,
}

impl TestDb {
    async fn new() -> Option<Self> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping PostgreSQL store test");
            return None;
        };
        let guard = SERIAL.lock().await;

        let pool = DatabasePool::connect(&DatabaseConfig {
            url,
            max_connections: 8,
            min_connections: 1,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 60,
        })
        .await
        .expect("Failed to connect to test database")
        .into_pool();

        run_migrations(&pool).await.expect("Failed to run migrations");
        sqlx::query("TRUNCATE api_keys, rpa_bots, users, tenants CASCADE")
            .execute(&pool)
            .await
            .expect("Failed to clean database");

        Some(Self {
            store: PgCredentialStore::new(pool),
            _guard: guard,
        })
    }

    async fn tenant(&self, name: &str) -> Tenant {
        self.store
            .create_tenant(&CreateTenant {
                name: name.to_string(),
                status: TenantStatus::Active,
            })
            .await
            .unwrap()
    }
}

fn internal_tenant() -> CreateTenant {
    CreateTenant {
        name: "Deltabots Internal".to_string(),
        status: TenantStatus::Active,
    }
}

fn user(email: &str, role: UserRole, tenant_id: Option<Uuid>) -> CreateUser {
    CreateUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        role,
        tenant_id,
    }
}

#[tokio::test]
async fn bootstrap_runs_once() {
    let Some(db) = TestDb::new().await else { return };

    let (tenant, admin) = db
        .store
        .bootstrap(&internal_tenant(), &user("admin@x.com", UserRole::Superadmin, None))
        .await
        .unwrap();
    assert_eq!(admin.tenant_id, Some(tenant.id));
    assert_eq!(tenant.contact_user_id, Some(admin.id));

    let err = db
        .store
        .bootstrap(&internal_tenant(), &user("other@x.com", UserRole::Superadmin, None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(db.store.count_tenants().await.unwrap(), 1);
    assert!(db.store.find_user_by_email("other@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn concurrent_bootstrap_succeeds_once() {
    let Some(db) = TestDb::new().await else { return };

    let mut handles = Vec::new();
    for i in 0..6 {
        let store = db.store.clone();
        handles.push(tokio::spawn(async move {
            let admin = user(&format!("admin{i}@x.com"), UserRole::Superadmin, None);
            store.bootstrap(&internal_tenant(), &admin).await
        }));
    }

    let mut ok = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(e) => assert_eq!(e.kind, ErrorKind::Conflict),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(db.store.count_tenants().await.unwrap(), 1);
}

#[tokio::test]
async fn failed_admin_insert_rolls_back_tenant() {
    let Some(db) = TestDb::new().await else { return };

    let mut empty_hash = user("admin@x.com", UserRole::Superadmin, None);
    empty_hash.password_hash = String::new();
    assert!(db.store.bootstrap(&internal_tenant(), &empty_hash).await.is_err());
    assert_eq!(db.store.count_tenants().await.unwrap(), 0);

    let mut long_name = user("admin@x.com", UserRole::Superadmin, None);
    long_name.name = "n".repeat(101);
    let err = db.store.bootstrap(&internal_tenant(), &long_name).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(db.store.count_tenants().await.unwrap(), 0);

    // The table is still empty, so setup can be retried.
    db.store
        .bootstrap(&internal_tenant(), &user("admin@x.com", UserRole::Superadmin, None))
        .await
        .unwrap();
}

#[tokio::test]
async fn constraint_violations_map_to_domain_errors() {
    let Some(db) = TestDb::new().await else { return };
    let acme = db.tenant("Acme").await;

    let err = db
        .store
        .create_tenant(&CreateTenant {
            name: "Acme".to_string(),
            status: TenantStatus::Inactive,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    db.store
        .create_user(&user("ops@acme.com", UserRole::ClientAdmin, Some(acme.id)))
        .await
        .unwrap();
    let err = db
        .store
        .create_user(&user("ops@acme.com", UserRole::ClientAdmin, Some(acme.id)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let err = db
        .store
        .create_user(&user("ghost@x.com", UserRole::ClientAdmin, Some(Uuid::new_v4())))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let bot = |code: &str, status: Option<String>| CreateBot {
        tenant_id: acme.id,
        code: code.to_string(),
        description: None,
        system_target: None,
        status,
    };
    let created = db.store.create_bot(&bot("ACME-1", None)).await.unwrap();
    assert_eq!(created.status, "Deployed");
    let err = db.store.create_bot(&bot("ACME-1", None)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let err = db
        .store
        .create_bot(&bot("ACME-2", Some("s".repeat(21))))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn delete_tenant_is_restricted_by_users() {
    let Some(db) = TestDb::new().await else { return };
    let acme = db.tenant("Acme").await;
    db.store
        .create_user_claiming_contact(&user("ops@acme.com", UserRole::ClientAdmin, Some(acme.id)))
        .await
        .unwrap();

    let err = db.store.delete_tenant(acme.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(db.store.find_tenant_by_id(acme.id).await.unwrap().is_some());
}

#[tokio::test]
async fn delete_tenant_cascades_bots_and_detaches_keys() {
    let Some(db) = TestDb::new().await else { return };
    let acme = db.tenant("Acme").await;

    db.store
        .create_bot(&CreateBot {
            tenant_id: acme.id,
            code: "ACME-1".to_string(),
            description: Some("Invoices".to_string()),
            system_target: Some("SAP".to_string()),
            status: None,
        })
        .await
        .unwrap();
    db.store
        .create_api_key(&CreateApiKey {
            key_value: "acme-key".to_string(),
            tenant_id: Some(acme.id),
            purpose: "automation".to_string(),
            expires_at: Some(Utc::now() + Duration::days(30)),
        })
        .await
        .unwrap();

    assert!(db.store.delete_tenant(acme.id).await.unwrap());
    assert!(db.store.find_bot_by_code("ACME-1").await.unwrap().is_none());
    let key = db.store.find_api_key_by_value("acme-key").await.unwrap().unwrap();
    assert_eq!(key.tenant_id, None);

    assert!(!db.store.delete_tenant(acme.id).await.unwrap());
}

#[tokio::test]
async fn concurrent_client_admins_claim_contact_once() {
    let Some(db) = TestDb::new().await else { return };
    let acme = db.tenant("Acme").await;

    let mut handles = Vec::new();
    for i in 0..6 {
        let store = db.store.clone();
        let data = user(&format!("ops{i}@acme.com"), UserRole::ClientAdmin, Some(acme.id));
        handles.push(tokio::spawn(async move {
            store.create_user_claiming_contact(&data).await
        }));
    }

    let mut winners = Vec::new();
    for handle in handles {
        let (created, claimed) = handle.await.unwrap().unwrap();
        if claimed {
            winners.push(created.id);
        }
    }
    assert_eq!(winners.len(), 1);
    let acme = db.store.find_tenant_by_id(acme.id).await.unwrap().unwrap();
    assert_eq!(acme.contact_user_id, Some(winners[0]));
}

#[tokio::test]
async fn failed_client_admin_insert_does_not_claim_contact() {
    let Some(db) = TestDb::new().await else { return };
    let acme = db.tenant("Acme").await;

    let mut long_email = user("ops@acme.com", UserRole::ClientAdmin, Some(acme.id));
    long_email.email = format!("{}@acme.com", "o".repeat(150));
    let err = db.store.create_user_claiming_contact(&long_email).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let acme = db.store.find_tenant_by_id(acme.id).await.unwrap().unwrap();
    assert!(acme.contact_user_id.is_none());
    assert!(db.store.list_users_by_tenant(acme.id, Default::default()).await.unwrap().is_empty());
}
