//! RPA bot repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use deltabots_core::result::AppResult;
use deltabots_core::types::PageRequest;
use deltabots_entity::bot::model::DEFAULT_BOT_STATUS;
use deltabots_entity::bot::{CreateBot, RpaBot};

use super::map_db_error;

/// Repository for the `rpa_bots` table.
#[derive(Debug, Clone)]
pub struct BotRepository {
    pool: PgPool,
}

impl BotRepository {
    /// Create a new bot repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a bot by its unique code.
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<RpaBot>> {
        sqlx::query_as::<_, RpaBot>("SELECT * FROM rpa_bots WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to find bot by code", e))
    }

    /// List the bots of one tenant.
    pub async fn find_by_tenant(&self, tenant_id: Uuid, page: &PageRequest) -> AppResult<Vec<RpaBot>> {
        sqlx::query_as::<_, RpaBot>(
            "SELECT * FROM rpa_bots WHERE tenant_id = $1 ORDER BY code ASC LIMIT $2 OFFSET $3",
        )
        .bind(tenant_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list bots by tenant", e))
    }

    /// Register a new bot.
    pub async fn create(&self, data: &CreateBot) -> AppResult<RpaBot> {
        sqlx::query_as::<_, RpaBot>(
            "INSERT INTO rpa_bots (tenant_id, code, description, system_target, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(data.tenant_id)
        .bind(&data.code)
        .bind(&data.description)
        .bind(&data.system_target)
        .bind(data.status.as_deref().unwrap_or(DEFAULT_BOT_STATUS))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to create bot", e))
    }
}
