//! Custom Axum extractors.

pub mod auth;
pub mod login;
pub mod pagination;

pub use auth::{ApiKeyAuth, BearerAuth};
pub use login::LoginCredentials;
pub use pagination::PaginationParams;
