use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Reference data from the seeded `role` table.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
pub struct Role {
    pub id: i32,
    pub name: String,
}

/// A seeded role with its permission names, as stored.
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct RoleWithPermissions {
    pub id: i32,
    pub name: String,
    pub permissions: Vec<String>,
}
