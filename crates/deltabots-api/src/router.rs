//! Route definitions for the Deltabots HTTP API.
//!
//! Every protected route declares its scheme through the extractor its
//! handler takes: [`BearerAuth`](crate::extractors::BearerAuth) or
//! [`ApiKeyAuth`](crate::extractors::ApiKeyAuth).

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::{delete, get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = middleware::cors::build_cors_layer(
        &state.config.server.cors,
        &state.config.auth.api_key_header,
    );

    Router::new()
        .merge(health_routes())
        .merge(setup_routes())
        .merge(auth_routes())
        .merge(tenant_routes())
        .merge(user_routes())
        .merge(bot_routes())
        .merge(api_key_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
}

fn setup_routes() -> Router<AppState> {
    Router::new().route("/setup/initial-user", post(handlers::setup::initial_user))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

fn tenant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tenants",
            get(handlers::tenant::list_tenants).post(handlers::tenant::create_tenant),
        )
        .route(
            "/tenants/{id}",
            get(handlers::tenant::get_tenant).delete(handlers::tenant::delete_tenant),
        )
        .route("/tenants/{id}/users", get(handlers::user::list_tenant_users))
        .route("/tenants/{id}/bots", get(handlers::bot::list_tenant_bots))
}

fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(handlers::user::create_user))
}

fn bot_routes() -> Router<AppState> {
    Router::new()
        .route("/bots", post(handlers::bot::create_bot))
        .route("/bots/{code}", get(handlers::bot::get_bot))
        .route("/bots/{code}/logs", get(handlers::bot::get_bot_logs))
}

fn api_key_routes() -> Router<AppState> {
    Router::new()
        .route("/api-keys", post(handlers::api_key::create_api_key))
        .route("/api-keys/{id}", delete(handlers::api_key::deactivate_api_key))
}
