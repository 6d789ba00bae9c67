use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A directed follower -> followed edge.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
pub struct Follow {
    pub follower_id: i32,
    pub followed_id: i32,
    pub created_at: DateTime<Utc>,
}
