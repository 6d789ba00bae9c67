use crate::database::stores::follow_store::FollowListEntry;
use crate::database::DbError;
use sqlx::{Executor, Postgres};

pub struct CollectStore;

impl CollectStore {
    /// Inserts the bookmark edge. Idempotent, mirroring the follow edge.
    pub async fn collect(
        executor: impl Executor<'_, Database = Postgres>,
        collector_id: i32,
        photo_id: i32,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            "INSERT INTO collect (collector_id, photo_id)
             VALUES ($1, $2)
             ON CONFLICT (collector_id, photo_id) DO NOTHING",
        )
        .bind(collector_id)
        .bind(photo_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn uncollect(
        executor: impl Executor<'_, Database = Postgres>,
        collector_id: i32,
        photo_id: i32,
    ) -> Result<bool, DbError> {
        let result =
            sqlx::query("DELETE FROM collect WHERE collector_id = $1 AND photo_id = $2")
                .bind(collector_id)
                .bind(photo_id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_collecting(
        executor: impl Executor<'_, Database = Postgres>,
        collector_id: i32,
        photo_id: i32,
    ) -> Result<bool, DbError> {
        Ok(sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM collect WHERE collector_id = $1 AND photo_id = $2)",
        )
        .bind(collector_id)
        .bind(photo_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn collectors_count(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
    ) -> Result<i64, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM collect WHERE photo_id = $1")
                .bind(photo_id)
                .fetch_one(executor)
                .await?,
        )
    }

    /// Users who collected the photo, newest bookmark first.
    pub async fn collectors_page(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<FollowListEntry>, DbError> {
        Ok(sqlx::query_as::<_, FollowListEntry>(
            "SELECT u.id, u.username, u.name, u.bio, u.avatar_s, c.created_at AS since
             FROM collect c
             JOIN app_user u ON u.id = c.collector_id
             WHERE c.photo_id = $1
             ORDER BY c.created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(photo_id)
        .bind(per_page)
        .bind(offset)
        .fetch_all(executor)
        .await?)
    }
}
