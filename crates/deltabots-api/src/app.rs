//! Application builder: wires router, middleware, and state into an Axum app.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;

use deltabots_core::config::AppConfig;
use deltabots_core::error::AppError;
use deltabots_database::CredentialStore;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application over `store`.
pub fn build_app(config: AppConfig, store: Arc<dyn CredentialStore>) -> Result<Router, AppError> {
    let state = AppState::new(config, store)?;
    Ok(build_router(state))
}

/// Serves the API until Ctrl+C.
///
/// In-flight requests get `server.shutdown_grace_seconds` to finish after
/// the signal; connections still open after that are dropped.
pub async fn serve(config: AppConfig, store: Arc<dyn CredentialStore>) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_app(config, store)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(address = %addr, "Deltabots API listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    let deadline = async move {
        if shutdown_rx.wait_for(|stopping| *stopping).await.is_ok() {
            tracing::info!(grace_seconds = grace.as_secs(), "Shutdown signal received, draining");
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = deadline => {
            tracing::warn!("Grace period elapsed with requests still open");
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
