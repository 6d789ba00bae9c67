use crate::database::app_user::{User, UserRole, UserWithPassword};
use crate::database::DbError;
use sqlx::{Executor, Postgres};

const USER_COLUMNS: &str = "id, username, email, name, website, bio, location, member_since, \
     confirmed, locked, active, role, avatar_raw, avatar_s, avatar_m, avatar_l, \
     receive_comment_notification, receive_follow_notification, \
     receive_collect_notification, public_collections";

const USER_WITH_PASSWORD_COLUMNS: &str =
    "id, username, email, password_hash, confirmed, active, role";

pub struct UserStore;

impl UserStore {
    //================================================================================
    // Core User Management (CRUD)
    //================================================================================

    /// Creates a new user. `confirmed` starts false.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        username: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, DbError> {
        let sql = format!(
            "INSERT INTO app_user (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .bind(role)
            .fetch_one(executor)
            .await?)
    }

    /// Deletes a user; photos, comments, edges and notifications cascade.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<(), DbError> {
        sqlx::query("DELETE FROM app_user WHERE id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    //================================================================================
    // Find / Get Methods
    //================================================================================

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<User>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user WHERE id = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn find_by_ids(
        executor: impl Executor<'_, Database = Postgres>,
        user_ids: &[i32],
    ) -> Result<Vec<User>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user WHERE id = ANY($1)");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(user_ids)
            .fetch_all(executor)
            .await?)
    }

    pub async fn find_by_username(
        executor: impl Executor<'_, Database = Postgres>,
        username: &str,
    ) -> Result<Option<User>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user WHERE username = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn find_by_email(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<Option<User>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user WHERE email = $1");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn find_by_email_with_password(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<Option<UserWithPassword>, DbError> {
        let sql =
            format!("SELECT {USER_WITH_PASSWORD_COLUMNS} FROM app_user WHERE email = $1");
        Ok(sqlx::query_as::<_, UserWithPassword>(&sql)
            .bind(email)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn find_by_id_with_password(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<UserWithPassword>, DbError> {
        let sql = format!("SELECT {USER_WITH_PASSWORD_COLUMNS} FROM app_user WHERE id = $1");
        Ok(sqlx::query_as::<_, UserWithPassword>(&sql)
            .bind(user_id)
            .fetch_optional(executor)
            .await?)
    }

    pub async fn username_exists(
        executor: impl Executor<'_, Database = Postgres>,
        username: &str,
    ) -> Result<bool, DbError> {
        Ok(
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM app_user WHERE username = $1)",
            )
            .bind(username)
            .fetch_one(executor)
            .await?,
        )
    }

    pub async fn email_exists(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<bool, DbError> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM app_user WHERE email = $1)")
                .bind(email)
                .fetch_one(executor)
                .await?,
        )
    }

    //================================================================================
    // Settings & Profile
    //================================================================================

    pub async fn update_profile(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        username: &str,
        name: Option<String>,
        website: Option<String>,
        bio: Option<String>,
        location: Option<String>,
    ) -> Result<User, DbError> {
        let sql = format!(
            "UPDATE app_user
             SET username = $1, name = $2, website = $3, bio = $4, location = $5
             WHERE id = $6
             RETURNING {USER_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(name)
            .bind(website)
            .bind(bio)
            .bind(location)
            .bind(user_id)
            .fetch_one(executor)
            .await?)
    }

    pub async fn update_password(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        password_hash: &str,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE app_user SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn update_email(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        email: &str,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE app_user SET email = $1 WHERE id = $2")
            .bind(email)
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn set_confirmed(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE app_user SET confirmed = TRUE WHERE id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn update_notification_settings(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        receive_comment: bool,
        receive_follow: bool,
        receive_collect: bool,
    ) -> Result<User, DbError> {
        let sql = format!(
            "UPDATE app_user
             SET receive_comment_notification = $1,
                 receive_follow_notification = $2,
                 receive_collect_notification = $3
             WHERE id = $4
             RETURNING {USER_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(receive_comment)
            .bind(receive_follow)
            .bind(receive_collect)
            .bind(user_id)
            .fetch_one(executor)
            .await?)
    }

    pub async fn update_privacy(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        public_collections: bool,
    ) -> Result<User, DbError> {
        let sql = format!(
            "UPDATE app_user SET public_collections = $1 WHERE id = $2 RETURNING {USER_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(public_collections)
            .bind(user_id)
            .fetch_one(executor)
            .await?)
    }

    pub async fn set_avatar_raw(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        filename: &str,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE app_user SET avatar_raw = $1 WHERE id = $2")
            .bind(filename)
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn set_avatar_derivatives(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        small: &str,
        medium: &str,
        large: &str,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE app_user SET avatar_s = $1, avatar_m = $2, avatar_l = $3 WHERE id = $4")
            .bind(small)
            .bind(medium)
            .bind(large)
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    //================================================================================
    // Moderation
    //================================================================================

    /// Locks a user: demotes the role and raises the flag in one step.
    pub async fn set_locked(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        locked: bool,
        role: UserRole,
    ) -> Result<User, DbError> {
        let sql = format!(
            "UPDATE app_user SET locked = $1, role = $2 WHERE id = $3 RETURNING {USER_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(locked)
            .bind(role)
            .bind(user_id)
            .fetch_one(executor)
            .await?)
    }

    pub async fn set_active(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        active: bool,
    ) -> Result<User, DbError> {
        let sql =
            format!("UPDATE app_user SET active = $1 WHERE id = $2 RETURNING {USER_COLUMNS}");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(active)
            .bind(user_id)
            .fetch_one(executor)
            .await?)
    }

    pub async fn set_role(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
        role: UserRole,
    ) -> Result<User, DbError> {
        let sql = format!("UPDATE app_user SET role = $1 WHERE id = $2 RETURNING {USER_COLUMNS}");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(role)
            .bind(user_id)
            .fetch_one(executor)
            .await?)
    }

    //================================================================================
    // Listings & Search
    //================================================================================

    pub async fn page(
        executor: impl Executor<'_, Database = Postgres>,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<User>, DbError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM app_user ORDER BY member_since DESC LIMIT $1 OFFSET $2"
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(per_page)
            .bind(offset)
            .fetch_all(executor)
            .await?)
    }

    pub async fn count(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM app_user")
            .fetch_one(executor)
            .await?)
    }

    pub async fn search_page(
        executor: impl Executor<'_, Database = Postgres>,
        query: &str,
        per_page: i64,
        offset: i64,
    ) -> Result<Vec<User>, DbError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM app_user
             WHERE username ILIKE $1 OR name ILIKE $1
             ORDER BY member_since DESC
             LIMIT $2 OFFSET $3"
        );
        Ok(sqlx::query_as::<_, User>(&sql)
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
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM app_user WHERE username ILIKE $1 OR name ILIKE $1",
        )
        .bind(format!("%{query}%"))
        .fetch_one(executor)
        .await?)
    }
}
