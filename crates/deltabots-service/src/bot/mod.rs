//! RPA bot registrations.

pub mod service;

pub use service::BotService;
