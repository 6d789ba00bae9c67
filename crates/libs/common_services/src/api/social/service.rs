use crate::api::notifications::service::{
    push_collect_notification, push_follow_notification,
};
use crate::api::pagination::Page;
use crate::api::social::error::SocialError;
use crate::database::app_user::{Permission, User};
use crate::database::collect_store::CollectStore;
use crate::database::follow_store::{FollowListEntry, FollowStore};
use crate::database::photo::Photo;
use crate::database::photo_store::PhotoStore;
use crate::database::user_store::UserStore;
use crate::page_offset;
use sqlx::PgPool;
use tracing::info;

async fn get_user_by_username(pool: &PgPool, username: &str) -> Result<User, SocialError> {
    UserStore::find_by_username(pool, username)
        .await?
        .ok_or_else(|| SocialError::UserNotFound(username.to_owned()))
}

async fn get_photo(pool: &PgPool, photo_id: i32) -> Result<Photo, SocialError> {
    PhotoStore::find_by_id(pool, photo_id)
        .await?
        .ok_or(SocialError::PhotoNotFound(photo_id))
}

//================================================================================
// Follow graph
//================================================================================

/// Follows a user by username. Fans a notification out to the target
/// when they opted in. The insert is idempotent; a repeated request is
/// reported as `AlreadyFollowing`.
pub async fn follow(
    pool: &PgPool,
    public_url: &str,
    user: &User,
    username: &str,
) -> Result<(), SocialError> {
    if !user.confirmed {
        return Err(SocialError::NotConfirmed);
    }
    if !user.can(Permission::Follow) {
        return Err(SocialError::PermissionDenied);
    }
    let target = get_user_by_username(pool, username).await?;
    if target.id == user.id {
        return Err(SocialError::SelfFollow);
    }

    let inserted = FollowStore::follow(pool, user.id, target.id).await?;
    if !inserted {
        return Err(SocialError::AlreadyFollowing);
    }
    info!("User {} followed {}", user.username, target.username);

    if target.receive_follow_notification {
        push_follow_notification(pool, public_url, &user.username, target.id).await?;
    }
    Ok(())
}

pub async fn unfollow(pool: &PgPool, user: &User, username: &str) -> Result<(), SocialError> {
    let target = get_user_by_username(pool, username).await?;
    let removed = FollowStore::unfollow(pool, user.id, target.id).await?;
    if !removed {
        return Err(SocialError::NotFollowing);
    }
    info!("User {} unfollowed {}", user.username, target.username);
    Ok(())
}

pub async fn followers_count(pool: &PgPool, username: &str) -> Result<i64, SocialError> {
    let target = get_user_by_username(pool, username).await?;
    Ok(FollowStore::followers_count(pool, target.id).await?)
}

pub async fn followers_page(
    pool: &PgPool,
    username: &str,
    per_page: i64,
    page: i64,
) -> Result<Page<FollowListEntry>, SocialError> {
    let target = get_user_by_username(pool, username).await?;
    let offset = page_offset(page, per_page);
    let items = FollowStore::followers_page(pool, target.id, per_page, offset).await?;
    let total = FollowStore::followers_count(pool, target.id).await?;
    Ok(Page::new(items, page, per_page, total))
}

pub async fn following_page(
    pool: &PgPool,
    username: &str,
    per_page: i64,
    page: i64,
) -> Result<Page<FollowListEntry>, SocialError> {
    let target = get_user_by_username(pool, username).await?;
    let offset = page_offset(page, per_page);
    let items = FollowStore::following_page(pool, target.id, per_page, offset).await?;
    let total = FollowStore::following_count(pool, target.id).await?;
    Ok(Page::new(items, page, per_page, total))
}

//================================================================================
// Collect graph
//================================================================================

/// Bookmarks a photo, mirroring the follow semantics.
pub async fn collect(
    pool: &PgPool,
    public_url: &str,
    user: &User,
    photo_id: i32,
) -> Result<(), SocialError> {
    if !user.confirmed {
        return Err(SocialError::NotConfirmed);
    }
    if !user.can(Permission::Collect) {
        return Err(SocialError::PermissionDenied);
    }
    let photo = get_photo(pool, photo_id).await?;

    let inserted = CollectStore::collect(pool, user.id, photo_id).await?;
    if !inserted {
        return Err(SocialError::AlreadyCollected);
    }
    info!("User {} collected photo {}", user.username, photo_id);

    if user.id != photo.author_id {
        let author = UserStore::find_by_id(pool, photo.author_id)
            .await?
            .ok_or(SocialError::PhotoNotFound(photo_id))?;
        if author.receive_collect_notification {
            push_collect_notification(pool, public_url, &user.username, photo_id, author.id)
                .await?;
        }
    }
    Ok(())
}

pub async fn uncollect(pool: &PgPool, user: &User, photo_id: i32) -> Result<(), SocialError> {
    get_photo(pool, photo_id).await?;
    let removed = CollectStore::uncollect(pool, user.id, photo_id).await?;
    if !removed {
        return Err(SocialError::NotCollected);
    }
    Ok(())
}

pub async fn is_collecting(
    pool: &PgPool,
    user: &User,
    photo_id: i32,
) -> Result<bool, SocialError> {
    Ok(CollectStore::is_collecting(pool, user.id, photo_id).await?)
}

/// Users who collected a photo, newest first.
pub async fn collectors_page(
    pool: &PgPool,
    photo_id: i32,
    per_page: i64,
    page: i64,
) -> Result<Page<FollowListEntry>, SocialError> {
    get_photo(pool, photo_id).await?;
    let offset = page_offset(page, per_page);
    let items = CollectStore::collectors_page(pool, photo_id, per_page, offset).await?;
    let total = CollectStore::collectors_count(pool, photo_id).await?;
    Ok(Page::new(items, page, per_page, total))
}

/// Photos a user collected. Private collections are visible only to
/// their owner and moderators.
pub async fn collections_page(
    pool: &PgPool,
    viewer: Option<&User>,
    username: &str,
    per_page: i64,
    page: i64,
) -> Result<Page<Photo>, SocialError> {
    let target = get_user_by_username(pool, username).await?;
    if !target.public_collections {
        let allowed = viewer
            .is_some_and(|v| v.id == target.id || v.can(Permission::Moderate));
        if !allowed {
            return Err(SocialError::PermissionDenied);
        }
    }
    let offset = page_offset(page, per_page);
    let items = PhotoStore::page_collected_by(pool, target.id, per_page, offset).await?;
    let total = PhotoStore::count_collected_by(pool, target.id).await?;
    Ok(Page::new(items, page, per_page, total))
}
