//! # deltabots-service
//!
//! Business logic service layer for Deltabots. Every service receives the
//! authenticated [`Principal`](deltabots_auth::Principal) and runs tenant
//! ownership through the [`AuthorizationPolicy`](deltabots_auth::AuthorizationPolicy)
//! before returning data.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod api_key;
pub mod bot;
pub mod logs;
pub mod setup;
pub mod tenant;
pub mod user;

pub use api_key::{ApiKeyService, IssuedApiKey, NewApiKey};
pub use bot::BotService;
pub use logs::LogQueryClient;
pub use setup::SetupService;
pub use tenant::TenantService;
pub use user::{NewUser, UserService};
