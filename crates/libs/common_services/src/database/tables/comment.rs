use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A comment on a photo. `replied_id` points at the comment this one
/// replies to; replies to replies are representable.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
pub struct Comment {
    pub id: i32,
    pub body: String,
    pub flag: i32,
    pub created_at: DateTime<Utc>,
    pub author_id: i32,
    pub photo_id: i32,
    pub replied_id: Option<i32>,
}
