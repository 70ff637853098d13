//! # deltabots-auth
//!
//! Credential verification and authorization for the Deltabots backend.
//!
//! ## Modules
//!
//! - `password` - Argon2id hashing with bounded input length
//! - `token` - signed access token issuing and verification
//! - `api_key` - superadmin and tenant-scoped API key verification
//! - `policy` - tenant ownership decisions
//! - `gateway` - per-route authentication producing a [`Principal`]

pub mod api_key;
pub mod gateway;
pub mod password;
pub mod policy;
pub mod principal;
pub mod token;

pub use api_key::{ApiKeyVerifier, generate_api_key};
pub use gateway::{AccessToken, AuthGateway, AuthScheme};
pub use password::PasswordHasher;
pub use policy::AuthorizationPolicy;
pub use principal::Principal;
pub use token::{Claims, TokenIssuer, TokenVerifier};
