use crate::database::comment::Comment;
use crate::database::DbError;
use sqlx::{Executor, Postgres};

const COMMENT_COLUMNS: &str = "id, body, flag, created_at, author_id, photo_id, replied_id";

pub struct CommentStore;

impl CommentStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        author_id: i32,
        photo_id: i32,
        body: &str,
        replied_id: Option<i32>,
    ) -> Result<Comment, DbError> {
        let sql = format!(
            "INSERT INTO comment (author_id, photo_id, body, replied_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COMMENT_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Comment>(&sql)
            .bind(author_id)
            .bind(photo_id)
            .bind(body)
            .bind(replied_id)
            .fetch_one(executor)
            .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        comment_id: i32,
    ) -> Result<Option<Comment>, DbError> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comment WHERE id = $1");
        Ok(sqlx::query_as::<_, Comment>(&sql)
            .bind(comment_id)
            .fetch_optional(executor)
            .await?)
    }

    /// Deletes the comment; replies cascade with it.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        comment_id: i32,
    ) -> Result<(), DbError> {
        sqlx::query("DELETE FROM comment WHERE id = $1")
            .bind(comment_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn increment_flag(
        executor: impl Executor<'_, Database = Postgres>,
        comment_id: i32,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE comment SET flag = flag + 1 WHERE id = $1")
            .bind(comment_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Comments of a photo in posting order (oldest first).
    pub async fn page_by_photo(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<Comment>, DbError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comment
             WHERE photo_id = $1
             ORDER BY created_at ASC
             LIMIT $2 OFFSET $3"
        );
        Ok(sqlx::query_as::<_, Comment>(&sql)
            .bind(photo_id)
            .bind(per_page)
            .bind(offset)
            .fetch_all(executor)
            .await?)
    }

    pub async fn count_by_photo(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
    ) -> Result<i64, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comment WHERE photo_id = $1")
                .bind(photo_id)
                .fetch_one(executor)
                .await?,
        )
    }

    /// Direct replies to a comment, oldest first.
    pub async fn replies_of(
        executor: impl Executor<'_, Database = Postgres>,
        comment_id: i32,
    ) -> Result<Vec<Comment>, DbError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comment WHERE replied_id = $1 ORDER BY created_at ASC"
        );
        Ok(sqlx::query_as::<_, Comment>(&sql)
            .bind(comment_id)
            .fetch_all(executor)
            .await?)
    }
}
