//! # deltabots-api
//!
//! HTTP API layer for Deltabots built on Axum.
//!
//! Every protected route declares its authentication scheme through the
//! extractor it takes: [`BearerAuth`](extractors::BearerAuth) or
//! [`ApiKeyAuth`](extractors::ApiKeyAuth). Handlers never see a request
//! that failed authentication.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
