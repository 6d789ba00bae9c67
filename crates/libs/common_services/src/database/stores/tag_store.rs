use crate::database::tag::Tag;
use crate::database::DbError;
use sqlx::{Executor, PgPool, Postgres};

pub struct TagStore;

impl TagStore {
    /// Finds the tag by name, creating it on first use.
    pub async fn find_or_create(pool: &PgPool, name: &str) -> Result<Tag, DbError> {
        let inserted = sqlx::query_as::<_, Tag>(
            "INSERT INTO tag (name) VALUES ($1)
             ON CONFLICT (name) DO NOTHING
             RETURNING id, name",
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;
        if let Some(tag) = inserted {
            return Ok(tag);
        }
        Ok(
            sqlx::query_as::<_, Tag>("SELECT id, name FROM tag WHERE name = $1")
                .bind(name)
                .fetch_one(pool)
                .await?,
        )
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        tag_id: i32,
    ) -> Result<Option<Tag>, DbError> {
        Ok(sqlx::query_as::<_, Tag>("SELECT id, name FROM tag WHERE id = $1")
            .bind(tag_id)
            .fetch_optional(executor)
            .await?)
    }

    /// Links a tag to a photo. Returns whether the link was new.
    pub async fn link(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
        tag_id: i32,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            "INSERT INTO photo_tag (photo_id, tag_id)
             VALUES ($1, $2)
             ON CONFLICT (photo_id, tag_id) DO NOTHING",
        )
        .bind(photo_id)
        .bind(tag_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn unlink(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
        tag_id: i32,
    ) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM photo_tag WHERE photo_id = $1 AND tag_id = $2")
            .bind(photo_id)
            .bind(tag_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn tags_of_photo(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
    ) -> Result<Vec<Tag>, DbError> {
        Ok(sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name FROM tag t
             JOIN photo_tag pt ON pt.tag_id = t.id
             WHERE pt.photo_id = $1
             ORDER BY t.name",
        )
        .bind(photo_id)
        .fetch_all(executor)
        .await?)
    }

    /// Removes the given tags if they no longer have any photo links.
    pub async fn delete_orphans(
        executor: impl Executor<'_, Database = Postgres>,
        tag_ids: &[i32],
    ) -> Result<u64, DbError> {
        let result = sqlx::query(
            "DELETE FROM tag
             WHERE id = ANY($1)
               AND NOT EXISTS (SELECT 1 FROM photo_tag pt WHERE pt.tag_id = tag.id)",
        )
        .bind(tag_ids)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn search_page(
        executor: impl Executor<'_, Database = Postgres>,
        query: &str,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<Tag>, DbError> {
        Ok(sqlx::query_as::<_, Tag>(
            "SELECT id, name FROM tag
             WHERE name ILIKE $1
             ORDER BY name
             LIMIT $2 OFFSET $3",
        )
        .bind(format!("%{query}%"))
        .bind(per_page)
        .bind(offset)
        .fetch_all(executor)
        .await?)
    }

    pub async fn search_count(
        executor: impl Executor<'_, Database = Postgres>,
        query: &str,
    ) -> Result<i64, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tag WHERE name ILIKE $1")
                .bind(format!("%{query}%"))
                .fetch_one(executor)
                .await?,
        )
    }

    /// The most used tags, for the landing page sidebar.
    pub async fn popular(
        executor: impl Executor<'_, Database = Postgres>,
        limit: i64,
    ) -> Result<Vec<Tag>, DbError> {
        Ok(sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name FROM tag t
             JOIN photo_tag pt ON pt.tag_id = t.id
             GROUP BY t.id
             ORDER BY COUNT(pt.photo_id) DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(executor)
        .await?)
    }
}
