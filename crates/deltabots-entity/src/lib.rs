//! # deltabots-entity
//!
//! Domain entity models. Every struct in this crate represents a database
//! table row or the data needed to insert one. Row types derive
//! `sqlx::FromRow`.

pub mod api_key;
pub mod bot;
pub mod tenant;
pub mod user;
