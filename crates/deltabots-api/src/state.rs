//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use deltabots_auth::password::PasswordValidator;
use deltabots_auth::{AuthGateway, AuthorizationPolicy};
use deltabots_core::config::AppConfig;
use deltabots_core::error::AppError;
use deltabots_database::CredentialStore;
use deltabots_service::{
    ApiKeyService, BotService, LogQueryClient, SetupService, TenantService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Immutable application configuration.
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Credential store (PostgreSQL or in-memory).
    pub store: Arc<dyn CredentialStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Authentication gateway.
    pub gateway: Arc<AuthGateway>,

    // ── Services ─────────────────────────────────────────────
    /// First-run setup.
    pub setup_service: Arc<SetupService>,
    /// Tenant management.
    pub tenant_service: Arc<TenantService>,
    /// User management.
    pub user_service: Arc<UserService>,
    /// Bot registrations.
    pub bot_service: Arc<BotService>,
    /// API key issuing.
    pub api_key_service: Arc<ApiKeyService>,
    /// Upstream log queries.
    pub log_client: Arc<LogQueryClient>,
}

impl AppState {
    /// Wires every service against `store`.
    pub fn new(config: AppConfig, store: Arc<dyn CredentialStore>) -> Result<Self, AppError> {
        let config = Arc::new(config);
        let auth = Arc::new(config.auth.clone());
        let policy = AuthorizationPolicy::new();

        let gateway = AuthGateway::new(&auth, Arc::clone(&store))?;
        let log_client = LogQueryClient::new(&config.log_service)?;

        Ok(Self {
            gateway: Arc::new(gateway),
            setup_service: Arc::new(SetupService::new(Arc::clone(&store), Arc::clone(&auth))),
            tenant_service: Arc::new(TenantService::new(Arc::clone(&store), policy)),
            user_service: Arc::new(UserService::new(
                Arc::clone(&store),
                policy,
                PasswordValidator::new(&auth),
            )),
            bot_service: Arc::new(BotService::new(Arc::clone(&store), policy)),
            api_key_service: Arc::new(ApiKeyService::new(Arc::clone(&store), policy)),
            log_client: Arc::new(log_client),
            store,
            config,
        })
    }
}
