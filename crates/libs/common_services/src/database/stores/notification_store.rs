use crate::database::notification::Notification;
use crate::database::DbError;
use sqlx::{Executor, Postgres};

const NOTIFICATION_COLUMNS: &str = "id, message, is_read, created_at, receiver_id";

pub struct NotificationStore;

impl NotificationStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        receiver_id: i32,
        message: &str,
    ) -> Result<Notification, DbError> {
        let sql = format!(
            "INSERT INTO notification (receiver_id, message)
             VALUES ($1, $2)
             RETURNING {NOTIFICATION_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Notification>(&sql)
            .bind(receiver_id)
            .bind(message)
            .fetch_one(executor)
            .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        notification_id: i32,
    ) -> Result<Option<Notification>, DbError> {
        let sql = format!("SELECT {NOTIFICATION_COLUMNS} FROM notification WHERE id = $1");
        Ok(sqlx::query_as::<_, Notification>(&sql)
            .bind(notification_id)
            .fetch_optional(executor)
            .await?)
    }

    /// The receiver's notifications, newest first, optionally unread only.
    pub async fn page(
        executor: impl Executor<'_, Database = Postgres>,
        receiver_id: i32,
        unread_only: bool,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, DbError> {
        let filter = if unread_only {
            "AND is_read = FALSE"
        } else {
            ""
        };
        let sql = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notification
             WHERE receiver_id = $1 {filter}
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        Ok(sqlx::query_as::<_, Notification>(&sql)
            .bind(receiver_id)
            .bind(per_page)
            .bind(offset)
            .fetch_all(executor)
            .await?)
    }

    pub async fn count(
        executor: impl Executor<'_, Database = Postgres>,
        receiver_id: i32,
        unread_only: bool,
    ) -> Result<i64, DbError> {
        let filter = if unread_only {
            "AND is_read = FALSE"
        } else {
            ""
        };
        let sql = format!("SELECT COUNT(*) FROM notification WHERE receiver_id = $1 {filter}");
        Ok(sqlx::query_scalar::<_, i64>(&sql)
            .bind(receiver_id)
            .fetch_one(executor)
            .await?)
    }

    pub async fn mark_read(
        executor: impl Executor<'_, Database = Postgres>,
        notification_id: i32,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE notification SET is_read = TRUE WHERE id = $1")
            .bind(notification_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn mark_all_read(
        executor: impl Executor<'_, Database = Postgres>,
        receiver_id: i32,
    ) -> Result<u64, DbError> {
        let result =
            sqlx::query("UPDATE notification SET is_read = TRUE WHERE receiver_id = $1")
                .bind(receiver_id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected())
    }
}
