use crate::api::notifications::error::NotificationsError;
use crate::api::pagination::Page;
use crate::database::app_user::User;
use crate::database::notification::Notification;
use crate::database::notification_store::NotificationStore;
use crate::database::DbError;
use crate::page_offset;
use sqlx::{Executor, PgPool, Postgres};

// The stored messages are small pre-rendered HTML fragments carrying a
// link to the actor's profile or the affected photo.

#[must_use]
pub fn follow_message(public_url: &str, follower_username: &str) -> String {
    format!(
        "User <a href=\"{public_url}/users/{follower_username}\">{follower_username}</a> followed you."
    )
}

#[must_use]
pub fn comment_message(public_url: &str, photo_id: i32) -> String {
    format!(
        "<a href=\"{public_url}/photos/{photo_id}#comments\">This photo</a> has new comment/reply."
    )
}

#[must_use]
pub fn collect_message(public_url: &str, collector_username: &str, photo_id: i32) -> String {
    format!(
        "User <a href=\"{public_url}/users/{collector_username}\">{collector_username}</a> \
         collected your <a href=\"{public_url}/photos/{photo_id}\">photo</a>."
    )
}

pub async fn push_follow_notification(
    executor: impl Executor<'_, Database = Postgres>,
    public_url: &str,
    follower_username: &str,
    receiver_id: i32,
) -> Result<Notification, DbError> {
    let message = follow_message(public_url, follower_username);
    NotificationStore::create(executor, receiver_id, &message).await
}

pub async fn push_comment_notification(
    executor: impl Executor<'_, Database = Postgres>,
    public_url: &str,
    photo_id: i32,
    receiver_id: i32,
) -> Result<Notification, DbError> {
    let message = comment_message(public_url, photo_id);
    NotificationStore::create(executor, receiver_id, &message).await
}

pub async fn push_collect_notification(
    executor: impl Executor<'_, Database = Postgres>,
    public_url: &str,
    collector_username: &str,
    photo_id: i32,
    receiver_id: i32,
) -> Result<Notification, DbError> {
    let message = collect_message(public_url, collector_username, photo_id);
    NotificationStore::create(executor, receiver_id, &message).await
}

//================================================================================
// Inbox
//================================================================================

pub async fn list_notifications(
    pool: &PgPool,
    user: &User,
    unread_only: bool,
    per_page: i64,
    page: i64,
) -> Result<Page<Notification>, NotificationsError> {
    let offset = page_offset(page, per_page);
    let items = NotificationStore::page(pool, user.id, unread_only, per_page, offset).await?;
    let total = NotificationStore::count(pool, user.id, unread_only).await?;
    Ok(Page::new(items, page, per_page, total))
}

pub async fn unread_count(pool: &PgPool, user: &User) -> Result<i64, NotificationsError> {
    Ok(NotificationStore::count(pool, user.id, true).await?)
}

/// Marks one notification read. Only the receiver may do so.
pub async fn read_notification(
    pool: &PgPool,
    user: &User,
    notification_id: i32,
) -> Result<(), NotificationsError> {
    let notification = NotificationStore::find_by_id(pool, notification_id)
        .await?
        .ok_or(NotificationsError::NotFound(notification_id))?;
    if notification.receiver_id != user.id {
        return Err(NotificationsError::AccessDenied);
    }
    NotificationStore::mark_read(pool, notification_id).await?;
    Ok(())
}

pub async fn read_all_notifications(
    pool: &PgPool,
    user: &User,
) -> Result<u64, NotificationsError> {
    Ok(NotificationStore::mark_all_read(pool, user.id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_link_the_actor_or_the_photo() {
        let url = "http://localhost:5000";
        assert_eq!(
            follow_message(url, "greyli"),
            "User <a href=\"http://localhost:5000/users/greyli\">greyli</a> followed you."
        );
        assert!(comment_message(url, 12).contains("/photos/12#comments"));
        let collect = collect_message(url, "greyli", 12);
        assert!(collect.contains("/users/greyli"));
        assert!(collect.contains("/photos/12"));
        assert!(collect.ends_with("photo</a>."));
    }
}
