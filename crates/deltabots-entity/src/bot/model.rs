//! Bot registration model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status given to newly registered bots.
pub const DEFAULT_BOT_STATUS: &str = "Deployed";

/// One automated process instance belonging to a tenant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RpaBot {
    /// Unique bot identifier.
    pub id: Uuid,
    /// Owning tenant.
    pub tenant_id: Uuid,
    /// Unique external lookup code.
    pub code: String,
    /// Free-form description.
    pub description: Option<String>,
    /// The system the bot automates.
    pub system_target: Option<String>,
    /// Deployment status.
    pub status: String,
    /// Last successful run reported by the bot.
    pub last_successful_run_at: Option<DateTime<Utc>>,
    /// When the bot was registered.
    pub created_at: DateTime<Utc>,
    /// When the bot was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to register a bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBot {
    /// Owning tenant.
    pub tenant_id: Uuid,
    /// Unique code.
    pub code: String,
    /// Description.
    pub description: Option<String>,
    /// Target system.
    pub system_target: Option<String>,
    /// Status; `Deployed` when omitted.
    pub status: Option<String>,
}
