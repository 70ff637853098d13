//! # deltabots-database
//!
//! Storage for tenants, users, bots, and API keys. The [`CredentialStore`]
//! trait is the narrow contract the authentication core consumes; it is
//! implemented over PostgreSQL ([`PgCredentialStore`]) and in memory
//! ([`MemoryStore`]).

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{CredentialStore, MemoryStore, PgCredentialStore};
