//! API key repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use deltabots_core::result::AppResult;
use deltabots_entity::api_key::{ApiKey, CreateApiKey};

use super::map_db_error;

/// Repository for the `api_keys` table.
#[derive(Debug, Clone)]
pub struct ApiKeyRepository {
    pool: PgPool,
}

impl ApiKeyRepository {
    /// Create a new API key repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a key record by its secret value.
    pub async fn find_by_value(&self, key_value: &str) -> AppResult<Option<ApiKey>> {
        sqlx::query_as::<_, ApiKey>("SELECT * FROM api_keys WHERE key_value = $1")
            .bind(key_value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to find api key", e))
    }

    /// Insert a new key.
    pub async fn create(&self, data: &CreateApiKey) -> AppResult<ApiKey> {
        sqlx::query_as::<_, ApiKey>(
            "INSERT INTO api_keys (key_value, tenant_id, purpose, expires_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.key_value)
        .bind(data.tenant_id)
        .bind(&data.purpose)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to create api key", e))
    }

    /// Mark a key inactive. Returns the updated row, or `None` if unknown.
    pub async fn deactivate(&self, id: Uuid) -> AppResult<Option<ApiKey>> {
        sqlx::query_as::<_, ApiKey>(
            "UPDATE api_keys SET is_active = FALSE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to deactivate api key", e))
    }
}
