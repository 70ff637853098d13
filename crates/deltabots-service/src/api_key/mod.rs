//! Tenant-scoped API key issuing and revocation.

pub mod service;

pub use service::{ApiKeyService, IssuedApiKey, NewApiKey};
