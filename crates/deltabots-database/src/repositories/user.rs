//! User repository implementation.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use deltabots_core::result::AppResult;
use deltabots_core::types::PageRequest;
use deltabots_entity::user::{CreateUser, User};

use super::map_db_error;

/// Repository for the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to find user by id", e))
    }

    /// Find a user by exact email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Failed to find user by email", e))
    }

    /// List the users of one tenant.
    pub async fn find_by_tenant(&self, tenant_id: Uuid, page: &PageRequest) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE tenant_id = $1 ORDER BY email ASC LIMIT $2 OFFSET $3",
        )
        .bind(tenant_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Failed to list users by tenant", e))
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        Self::insert_with(&self.pool, data).await
    }

    pub(crate) async fn insert_with<'e, E: PgExecutor<'e>>(
        executor: E,
        data: &CreateUser,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role, tenant_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(data.tenant_id)
        .fetch_one(executor)
        .await
        .map_err(|e| map_db_error("Failed to create user", e))
    }
}
