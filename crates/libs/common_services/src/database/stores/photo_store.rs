use crate::database::photo::{Photo, PhotoTagOrder};
use crate::database::DbError;
use sqlx::{Executor, Postgres};

const PHOTO_COLUMNS: &str =
    "id, description, filename, filename_s, filename_m, can_comment, flag, created_at, author_id";

pub struct PhotoStore;

impl PhotoStore {
    //================================================================================
    // Core Photo Management (CRUD)
    //================================================================================

    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        author_id: i32,
        filename: &str,
        filename_s: &str,
        filename_m: &str,
        description: Option<String>,
    ) -> Result<Photo, DbError> {
        let sql = format!(
            "INSERT INTO photo (author_id, filename, filename_s, filename_m, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PHOTO_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Photo>(&sql)
            .bind(author_id)
            .bind(filename)
            .bind(filename_s)
            .bind(filename_m)
            .bind(description)
            .fetch_one(executor)
            .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
    ) -> Result<Option<Photo>, DbError> {
        let sql = format!("SELECT {PHOTO_COLUMNS} FROM photo WHERE id = $1");
        Ok(sqlx::query_as::<_, Photo>(&sql)
            .bind(photo_id)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn update_description(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
        description: Option<String>,
    ) -> Result<Photo, DbError> {
        let sql =
            format!("UPDATE photo SET description = $1 WHERE id = $2 RETURNING {PHOTO_COLUMNS}");
        Ok(sqlx::query_as::<_, Photo>(&sql)
            .bind(description)
            .bind(photo_id)
            .fetch_one(executor)
            .await?)
    }

    /// Flips the per-photo commenting switch and returns the new row.
    pub async fn toggle_can_comment(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
    ) -> Result<Photo, DbError> {
        let sql = format!(
            "UPDATE photo SET can_comment = NOT can_comment WHERE id = $1 RETURNING {PHOTO_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Photo>(&sql)
            .bind(photo_id)
            .fetch_one(executor)
            .await?)
    }

    /// Report counter; no threshold action is attached to it.
    pub async fn increment_flag(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE photo SET flag = flag + 1 WHERE id = $1")
            .bind(photo_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Deletes the row; comments, tag links and collect edges cascade.
    /// File removal is the caller's post-commit side effect.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        photo_id: i32,
    ) -> Result<(), DbError> {
        sqlx::query("DELETE FROM photo WHERE id = $1")
            .bind(photo_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    //================================================================================
    // Navigation
    //================================================================================

    /// The author's next photo by id, if any.
    pub async fn next_of(
        executor: impl Executor<'_, Database = Postgres>,
        author_id: i32,
        photo_id: i32,
    ) -> Result<Option<Photo>, DbError> {
        let sql = format!(
            "SELECT {PHOTO_COLUMNS} FROM photo
             WHERE author_id = $1 AND id > $2
             ORDER BY id ASC LIMIT 1"
        );
        Ok(sqlx::query_as::<_, Photo>(&sql)
            .bind(author_id)
            .bind(photo_id)
            .fetch_optional(executor)
            .await?)
    }

    /// The author's previous photo by id, if any.
    pub async fn previous_of(
        executor: impl Executor<'_, Database = Postgres>,
        author_id: i32,
        photo_id: i32,
    ) -> Result<Option<Photo>, DbError> {
        let sql = format!(
            "SELECT {PHOTO_COLUMNS} FROM photo
             WHERE author_id = $1 AND id < $2
             ORDER BY id DESC LIMIT 1"
        );
        Ok(sqlx::query_as::<_, Photo>(&sql)
            .bind(author_id)
            .bind(photo_id)
            .fetch_optional(executor)
            .await?)
    }

    //================================================================================
    // Listings
    //================================================================================

    pub async fn page_by_author(
        executor: impl Executor<'_, Database = Postgres>,
        author_id: i32,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<Photo>, DbError> {
        let sql = format!(
            "SELECT {PHOTO_COLUMNS} FROM photo
             WHERE author_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        Ok(sqlx::query_as::<_, Photo>(&sql)
            .bind(author_id)
            .bind(per_page)
            .bind(offset)
            .fetch_all(executor)
            .await?)
    }

    pub async fn count_by_author(
        executor: impl Executor<'_, Database = Postgres>,
        author_id: i32,
    ) -> Result<i64, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM photo WHERE author_id = $1")
                .bind(author_id)
                .fetch_one(executor)
                .await?,
        )
    }

    /// Home feed: photos of users the given user follows.
    pub async fn feed_page(
        executor: impl Executor<'_, Database = Postgres>,
        follower_id: i32,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<Photo>, DbError> {
        let sql = format!(
            "SELECT p.{} FROM photo p
             JOIN follow f ON f.followed_id = p.author_id
             WHERE f.follower_id = $1
             ORDER BY p.created_at DESC
             LIMIT $2 OFFSET $3",
            PHOTO_COLUMNS.replace(", ", ", p.")
        );
        Ok(sqlx::query_as::<_, Photo>(&sql)
            .bind(follower_id)
            .bind(per_page)
            .bind(offset)
            .fetch_all(executor)
            .await?)
    }

    pub async fn feed_count(
        executor: impl Executor<'_, Database = Postgres>,
        follower_id: i32,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM photo p
             JOIN follow f ON f.followed_id = p.author_id
             WHERE f.follower_id = $1",
        )
        .bind(follower_id)
        .fetch_one(executor)
        .await?)
    }

    /// A random sample for the explore page.
    pub async fn random(
        executor: impl Executor<'_, Database = Postgres>,
        limit: i64,
    ) -> Result<Vec<Photo>, DbError> {
        let sql = format!("SELECT {PHOTO_COLUMNS} FROM photo ORDER BY RANDOM() LIMIT $1");
        Ok(sqlx::query_as::<_, Photo>(&sql)
            .bind(limit)
            .fetch_all(executor)
            .await?)
    }

    /// Photos carrying a tag, ordered by time or by collector count.
    pub async fn page_by_tag(
        executor: impl Executor<'_, Database = Postgres>,
        tag_id: i32,
        order: PhotoTagOrder,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<Photo>, DbError> {
        let order_sql = match order {
            PhotoTagOrder::ByTime => "p.created_at DESC",
            PhotoTagOrder::ByCollects => {
                "(SELECT COUNT(*) FROM collect c WHERE c.photo_id = p.id) DESC"
            }
        };
        let sql = format!(
            "SELECT p.{} FROM photo p
             JOIN photo_tag pt ON pt.photo_id = p.id
             WHERE pt.tag_id = $1
             ORDER BY {order_sql}
             LIMIT $2 OFFSET $3",
            PHOTO_COLUMNS.replace(", ", ", p.")
        );
        Ok(sqlx::query_as::<_, Photo>(&sql)
            .bind(tag_id)
            .bind(per_page)
            .bind(offset)
            .fetch_all(executor)
            .await?)
    }

    pub async fn count_by_tag(
        executor: impl Executor<'_, Database = Postgres>,
        tag_id: i32,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM photo_tag WHERE tag_id = $1",
        )
        .bind(tag_id)
        .fetch_one(executor)
        .await?)
    }

    /// Photos a user has collected, newest bookmark first.
    pub async fn page_collected_by(
        executor: impl Executor<'_, Database = Postgres>,
        collector_id: i32,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<Photo>, DbError> {
        let sql = format!(
            "SELECT p.{} FROM photo p
             JOIN collect c ON c.photo_id = p.id
             WHERE c.collector_id = $1
             ORDER BY c.created_at DESC
             LIMIT $2 OFFSET $3",
            PHOTO_COLUMNS.replace(", ", ", p.")
        );
        Ok(sqlx::query_as::<_, Photo>(&sql)
            .bind(collector_id)
            .bind(per_page)
            .bind(offset)
            .fetch_all(executor)
            .await?)
    }

    pub async fn count_collected_by(
        executor: impl Executor<'_, Database = Postgres>,
        collector_id: i32,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM collect WHERE collector_id = $1",
        )
        .bind(collector_id)
        .fetch_one(executor)
        .await?)
    }

    //================================================================================
    // Search
    //================================================================================

    pub async fn search_page(
        executor: impl Executor<'_, Database = Postgres>,
        query: &str,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<Photo>, DbError> {
        let sql = format!(
            "SELECT {PHOTO_COLUMNS} FROM photo
             WHERE description ILIKE $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        Ok(sqlx::query_as::<_, Photo>(&sql)
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
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM photo WHERE description ILIKE $1")
                .bind(format!("%{query}%"))
                .fetch_one(executor)
                .await?,
        )
    }
}
