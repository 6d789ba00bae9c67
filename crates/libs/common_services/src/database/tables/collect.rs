use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A user -> photo bookmark edge.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
pub struct Collect {
    pub collector_id: i32,
    pub photo_id: i32,
    pub created_at: DateTime<Utc>,
}
