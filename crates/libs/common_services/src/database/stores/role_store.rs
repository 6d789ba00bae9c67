use crate::database::role::{Role, RoleWithPermissions};
use crate::database::DbError;
use sqlx::{Executor, PgPool, Postgres};

pub struct RoleStore;

impl RoleStore {
    pub async fn list(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<Role>, DbError> {
        Ok(
            sqlx::query_as::<_, Role>("SELECT id, name FROM role ORDER BY id")
                .fetch_all(executor)
                .await?,
        )
    }

    /// The seeded roles with their permission names, as stored.
    pub async fn list_with_permissions(pool: &PgPool) -> Result<Vec<RoleWithPermissions>, DbError> {
        let roles = Self::list(pool).await?;
        let mut result = Vec::with_capacity(roles.len());
        for role in roles {
            let permissions = sqlx::query_scalar::<_, String>(
                "SELECT p.name FROM permission p
                 JOIN role_permission rp ON rp.permission_id = p.id
                 WHERE rp.role_id = $1
                 ORDER BY p.id",
            )
            .bind(role.id)
            .fetch_all(pool)
            .await?;
            result.push(RoleWithPermissions {
                id: role.id,
                name: role.name,
                permissions,
            });
        }
        Ok(result)
    }
}
