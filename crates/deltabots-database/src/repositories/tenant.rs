//! Tenant repository implementation.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use deltabots_core::result::AppResult;
use deltabots_core::types::PageRequest;
use deltabots_entity::tenant::{CreateTenant, Tenant};

use super::map_db_error;

/// Repository for the `tenants` table.
#[derive(Debug, Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    /// Create a new tenant repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a tenant by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tenant>> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to find tenant by id", e))
    }

    /// List tenants ordered by name.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<Vec<Tenant>> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants ORDER BY name ASC LIMIT $1 OFFSET $2")
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to list tenants", e))
    }

    /// Count all tenants.
    pub async fn count(&self) -> AppResult<u64> {
        Self::count_with(&self.pool).await
    }

    /// Create a new tenant.
    pub async fn create(&self, data: &CreateTenant) -> AppResult<Tenant> {
        Self::insert_with(&self.pool, data).await
    }

    /// Delete a tenant. Fails with a conflict while users still reference it.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to delete tenant", e))?;
        Ok(result.rows_affected() > 0)
    }

    pub(crate) async fn count_with<'e, E: PgExecutor<'e>>(executor: E) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tenants")
            .fetch_one(executor)
            .await
            .map_err(|e| map_db_error("Failed to count tenants", e))?;
        Ok(total.max(0) as u64)
    }

    pub(crate) async fn insert_with<'e, E: PgExecutor<'e>>(
        executor: E,
        data: &CreateTenant,
    ) -> AppResult<Tenant> {
        sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (name, status) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.status)
        .fetch_one(executor)
        .await
        .map_err(|e| map_db_error("Failed to create tenant", e))
    }

    pub(crate) async fn set_contact_with<'e, E: PgExecutor<'e>>(
        executor: E,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Tenant>> {
        sqlx::query_as::<_, Tenant>(
            "UPDATE tenants SET contact_user_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_db_error("Failed to set tenant contact", e))
    }

    pub(crate) async fn lock_row_with<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> AppResult<()> {
        sqlx::query("SELECT id FROM tenants WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map(|_| ())
            .map_err(|e| map_db_error("Failed to lock tenant", e))
    }

    /// Sets the contact only while it is still unset.
    pub(crate) async fn claim_contact_with<'e, E: PgExecutor<'e>>(
        executor: E,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE tenants SET contact_user_id = $2, updated_at = NOW() \
             WHERE id = $1 AND contact_user_id IS NULL",
        )
        .bind(tenant_id)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(|e| map_db_error("Failed to claim tenant contact", e))?;
        Ok(result.rows_affected() > 0)
    }
}
