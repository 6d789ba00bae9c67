use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A notification row. `message` is a pre-rendered HTML fragment with a
/// link to the actor or the photo that triggered it.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
pub struct Notification {
    pub id: i32,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub receiver_id: i32,
}
