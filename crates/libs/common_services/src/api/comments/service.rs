use crate::api::comments::error::CommentsError;
use crate::api::comments::interfaces::CommentEntry;
use crate::api::notifications::service::push_comment_notification;
use crate::api::pagination::Page;
use crate::api::users::interfaces::UserCard;
use crate::database::app_user::{Permission, User};
use crate::database::comment::Comment;
use crate::database::comment_store::CommentStore;
use crate::database::photo::Photo;
use crate::database::photo_store::PhotoStore;
use crate::database::user_store::UserStore;
use crate::page_offset;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::info;

async fn get_photo(pool: &PgPool, photo_id: i32) -> Result<Photo, CommentsError> {
    PhotoStore::find_by_id(pool, photo_id)
        .await?
        .ok_or(CommentsError::PhotoNotFound(photo_id))
}

fn validate_body(body: &str) -> Result<(), CommentsError> {
    if body.trim().is_empty() {
        return Err(CommentsError::Validation(
            "The comment body must not be empty.".to_owned(),
        ));
    }
    if body.len() > 1000 {
        return Err(CommentsError::Validation(
            "The comment must be 1000 characters or fewer.".to_owned(),
        ));
    }
    Ok(())
}

/// Publishes a comment, optionally as a reply. Fans notifications out to
/// the photo's author and, for replies, to the replied comment's author
/// (each only when they opted in and are not the actor).
pub async fn create_comment(
    pool: &PgPool,
    public_url: &str,
    user: &User,
    photo_id: i32,
    body: &str,
    reply_to: Option<i32>,
) -> Result<Comment, CommentsError> {
    if !user.confirmed {
        return Err(CommentsError::NotConfirmed);
    }
    if !user.can(Permission::Comment) {
        return Err(CommentsError::PermissionDenied);
    }
    let photo = get_photo(pool, photo_id).await?;
    if !photo.can_comment {
        return Err(CommentsError::CommentsDisabled);
    }
    validate_body(body)?;

    let replied = match reply_to {
        Some(replied_id) => {
            let replied = CommentStore::find_by_id(pool, replied_id)
                .await?
                .ok_or(CommentsError::CommentNotFound(replied_id))?;
            if replied.photo_id != photo_id {
                return Err(CommentsError::Validation(
                    "The replied comment belongs to another photo.".to_owned(),
                ));
            }
            Some(replied)
        }
        None => None,
    };

    let comment =
        CommentStore::create(pool, user.id, photo_id, body, replied.as_ref().map(|c| c.id))
            .await?;
    info!("User {} commented on photo {}", user.username, photo_id);

    if user.id != photo.author_id {
        let author = UserStore::find_by_id(pool, photo.author_id)
            .await?
            .ok_or(CommentsError::PhotoNotFound(photo_id))?;
        if author.receive_comment_notification {
            push_comment_notification(pool, public_url, photo_id, author.id).await?;
        }
    }
    if let Some(replied) = replied {
        if replied.author_id != user.id && replied.author_id != photo.author_id {
            let replied_author = UserStore::find_by_id(pool, replied.author_id).await?;
            if let Some(replied_author) = replied_author {
                if replied_author.receive_comment_notification {
                    push_comment_notification(pool, public_url, photo_id, replied_author.id)
                        .await?;
                }
            }
        }
    }

    Ok(comment)
}

/// Comments of a photo in posting order, each with its author card.
pub async fn list_comments(
    pool: &PgPool,
    photo_id: i32,
    per_page: i64,
    page: i64,
) -> Result<Page<CommentEntry>, CommentsError> {
    get_photo(pool, photo_id).await?;
    let offset = page_offset(page, per_page);
    let comments = CommentStore::page_by_photo(pool, photo_id, per_page, offset).await?;
    let total = CommentStore::count_by_photo(pool, photo_id).await?;

    let author_ids: Vec<i32> = comments.iter().map(|c| c.author_id).collect();
    let authors: HashMap<i32, UserCard> = UserStore::find_by_ids(pool, &author_ids)
        .await?
        .iter()
        .map(|u| (u.id, UserCard::from(u)))
        .collect();

    let items = comments
        .into_iter()
        .filter_map(|comment| {
            let author = authors.get(&comment.author_id)?.clone();
            Some(CommentEntry { comment, author })
        })
        .collect();
    Ok(Page::new(items, page, per_page, total))
}

pub async fn report_comment(
    pool: &PgPool,
    user: &User,
    comment_id: i32,
) -> Result<(), CommentsError> {
    if !user.confirmed {
        return Err(CommentsError::NotConfirmed);
    }
    CommentStore::find_by_id(pool, comment_id)
        .await?
        .ok_or(CommentsError::CommentNotFound(comment_id))?;
    CommentStore::increment_flag(pool, comment_id).await?;
    Ok(())
}

/// Deletes a comment (author or moderator); replies cascade.
pub async fn delete_comment(
    pool: &PgPool,
    user: &User,
    comment_id: i32,
) -> Result<(), CommentsError> {
    let comment = CommentStore::find_by_id(pool, comment_id)
        .await?
        .ok_or(CommentsError::CommentNotFound(comment_id))?;
    if user.id != comment.author_id && !user.can(Permission::Moderate) {
        return Err(CommentsError::PermissionDenied);
    }
    CommentStore::delete(pool, comment_id).await?;
    info!("Comment {} deleted by {}", comment_id, user.username);
    Ok(())
}
