use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::credential::models::UserId;
use crate::domain::errors::StoreError;
use crate::domain::permission::models::ActionCode;
use crate::domain::permission::models::Permission;
use crate::domain::permission::ports::GrantStore;

pub struct PostgresGrantStore {
    pool: PgPool,
}

impl PostgresGrantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PermissionRow {
    code: String,
    name: String,
}

#[async_trait]
impl GrantStore for PostgresGrantStore {
    async fn has_grant(&self, user_id: UserId, action: &ActionCode) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM user_permissions up
                JOIN permissions p ON p.id = up.permission_id
                WHERE up.user_id = $1 AND p.code = $2
            )
            "#,
        )
        .bind(user_id.as_i64())
        .bind(action.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::DatabaseError(e.to_string()))
    }

    async fn permissions_for(&self, user_id: UserId) -> Result<Vec<Permission>, StoreError> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT p.code, p.name
            FROM user_permissions up
            JOIN permissions p ON p.id = up.permission_id
            WHERE up.user_id = $1
            ORDER BY p.id
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| Permission::new(ActionCode::new(row.code), row.name))
            .collect())
    }
}
