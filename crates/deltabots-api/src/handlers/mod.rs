//! Route handlers, one module per resource.

pub mod api_key;
pub mod auth;
pub mod bot;
pub mod health;
pub mod setup;
pub mod tenant;
pub mod user;
