//! Outbound queries against the third-party bot log service.

pub mod client;

pub use client::LogQueryClient;
