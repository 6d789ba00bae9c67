use crate::database::DbError;
use sqlx::{Executor, Postgres};

pub struct FollowStore;

impl FollowStore {
    /// Inserts the edge. Idempotent: a concurrent or repeated follow is
    /// absorbed by the conflict clause. Returns whether a row was added.
    pub async fn follow(
        executor: impl Executor<'_, Database = Postgres>,
        follower_id: i32,
        followed_id: i32,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            "INSERT INTO follow (follower_id, followed_id)
             VALUES ($1, $2)
             ON CONFLICT (follower_id, followed_id) DO NOTHING",
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes the edge if present. Returns whether a row was removed.
    pub async fn unfollow(
        executor: impl Executor<'_, Database = Postgres>,
        follower_id: i32,
        followed_id: i32,
    ) -> Result<bool, DbError> {
        let result =
            sqlx::query("DELETE FROM follow WHERE follower_id = $1 AND followed_id = $2")
                .bind(follower_id)
                .bind(followed_id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_following(
        executor: impl Executor<'_, Database = Postgres>,
        follower_id: i32,
        followed_id: i32,
    ) -> Result<bool, DbError> {
        Ok(sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM follow WHERE follower_id = $1 AND followed_id = $2)",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn followers_count(
        executor: impl Executor<'_, Database = Postgres>,
        followed_id: i32,
    ) -> Result<i64, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM follow WHERE followed_id = $1")
                .bind(followed_id)
                .fetch_one(executor)
                .await?,
        )
    }

    pub async fn following_count(
        executor: impl Executor<'_, Database = Postgres>,
        follower_id: i32,
    ) -> Result<i64, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM follow WHERE follower_id = $1")
                .bind(follower_id)
                .fetch_one(executor)
                .await?,
        )
    }

    /// Users following the given user, newest edge first.
    pub async fn followers_page(
        executor: impl Executor<'_, Database = Postgres>,
        followed_id: i32,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<FollowListEntry>, DbError> {
        Ok(sqlx::query_as::<_, FollowListEntry>(
            "SELECT u.id, u.username, u.name, u.bio, u.avatar_s, f.created_at AS since
             FROM follow f
             JOIN app_user u ON u.id = f.follower_id
             WHERE f.followed_id = $1
             ORDER BY f.created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(followed_id)
        .bind(per_page)
        .bind(offset)
        .fetch_all(executor)
        .await?)
    }

    /// Users the given user follows, newest edge first.
    pub async fn following_page(
        executor: impl Executor<'_, Database = Postgres>,
        follower_id: i32,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<FollowListEntry>, DbError> {
        Ok(sqlx::query_as::<_, FollowListEntry>(
            "SELECT u.id, u.username, u.name, u.bio, u.avatar_s, f.created_at AS since
             FROM follow f
             JOIN app_user u ON u.id = f.followed_id
             WHERE f.follower_id = $1
             ORDER BY f.created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(follower_id)
        .bind(per_page)
        .bind(offset)
        .fetch_all(executor)
        .await?)
    }
}

/// One row of a followers/following listing.
#[derive(Debug, serde::Serialize, sqlx::FromRow, Clone, utoipa::ToSchema)]
pub struct FollowListEntry {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_s: Option<String>,
    pub since: chrono::DateTime<chrono::Utc>,
}
