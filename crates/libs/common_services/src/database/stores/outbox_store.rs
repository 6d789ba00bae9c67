use crate::database::outbox_email::OutboxEmail;
use crate::database::DbError;
use sqlx::{Executor, Postgres};

const OUTBOX_COLUMNS: &str = "id, recipient, subject, body, status, attempts, created_at, sent_at";

pub struct OutboxStore;

impl OutboxStore {
    pub async fn enqueue(
        executor: impl Executor<'_, Database = Postgres>,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<OutboxEmail, DbError> {
        let sql = format!(
            "INSERT INTO outbox_email (recipient, subject, body)
             VALUES ($1, $2, $3)
             RETURNING {OUTBOX_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, OutboxEmail>(&sql)
            .bind(recipient)
            .bind(subject)
            .bind(body)
            .fetch_one(executor)
            .await?)
    }

    /// The next batch of queued emails, oldest first.
    pub async fn next_batch(
        executor: impl Executor<'_, Database = Postgres>,
        batch_size: i64,
    ) -> Result<Vec<OutboxEmail>, DbError> {
        let sql = format!(
            "SELECT {OUTBOX_COLUMNS} FROM outbox_email
             WHERE status = 'queued'
             ORDER BY created_at ASC
             LIMIT $1"
        );
        Ok(sqlx::query_as::<_, OutboxEmail>(&sql)
            .bind(batch_size)
            .fetch_all(executor)
            .await?)
    }

    pub async fn mark_sent(
        executor: impl Executor<'_, Database = Postgres>,
        email_id: i64,
    ) -> Result<(), DbError> {
        sqlx::query(
            "UPDATE outbox_email
             SET status = 'sent', attempts = attempts + 1, sent_at = now()
             WHERE id = $1",
        )
        .bind(email_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Records a failed attempt; the row leaves the queue for good once
    /// `max_attempts` is reached.
    pub async fn mark_failed_attempt(
        executor: impl Executor<'_, Database = Postgres>,
        email_id: i64,
        max_attempts: i32,
    ) -> Result<(), DbError> {
        sqlx::query(
            "UPDATE outbox_email
             SET attempts = attempts + 1,
                 status = CASE WHEN attempts + 1 >= $2 THEN 'failed'::email_status
                               ELSE 'queued'::email_status END
             WHERE id = $1",
        )
        .bind(email_id)
        .bind(max_attempts)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        email_id: i64,
    ) -> Result<Option<OutboxEmail>, DbError> {
        let sql = format!("SELECT {OUTBOX_COLUMNS} FROM outbox_email WHERE id = $1");
        Ok(sqlx::query_as::<_, OutboxEmail>(&sql)
            .bind(email_id)
            .fetch_optional(executor)
            .await?)
    }
}
