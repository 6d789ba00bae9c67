use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}
