//! User management.

pub mod service;

pub use service::{NewUser, UserService};
