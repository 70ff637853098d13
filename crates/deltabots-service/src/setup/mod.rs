//! First-run bootstrap.

pub mod service;

pub use service::SetupService;
