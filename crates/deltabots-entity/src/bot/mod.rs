//! RPA bot registration entities.

pub mod model;

pub use model::{CreateBot, RpaBot};
