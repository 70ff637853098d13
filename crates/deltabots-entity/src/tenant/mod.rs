//! Tenant (client organization) entities.

pub mod model;
pub mod status;

pub use model::{CreateTenant, Tenant};
pub use status::TenantStatus;
