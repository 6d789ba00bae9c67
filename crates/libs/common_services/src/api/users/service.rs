use crate::api::pagination::Page;
use crate::api::users::error::UsersError;
use crate::api::users::interfaces::{
    EditProfilePayload, NotificationSettingPayload, PrivacySettingPayload, UserProfile,
};
use crate::database::app_user::User;
use crate::database::follow_store::FollowStore;
use crate::database::photo::Photo;
use crate::database::photo_store::PhotoStore;
use crate::database::user_store::UserStore;
use crate::images::resize_rgb;
use crate::{page_offset, suffixed_filename, unique_filename};
use app_state::UploadSettings;
use color_eyre::eyre::eyre;
use sqlx::PgPool;
use tokio::{fs, task};
use tracing::info;

use crate::api::auth::service::validate_username;

async fn get_user_by_username(pool: &PgPool, username: &str) -> Result<User, UsersError> {
    UserStore::find_by_username(pool, username)
        .await?
        .ok_or_else(|| UsersError::UserNotFound(username.to_owned()))
}

/// The public profile of a user with graph counts; follow flags are
/// filled in for authenticated viewers.
pub async fn get_profile(
    pool: &PgPool,
    viewer: Option<&User>,
    username: &str,
) -> Result<UserProfile, UsersError> {
    let user = get_user_by_username(pool, username).await?;

    let photos_count = PhotoStore::count_by_author(pool, user.id).await?;
    let followers_count = FollowStore::followers_count(pool, user.id).await?;
    let following_count = FollowStore::following_count(pool, user.id).await?;
    let collections_count = PhotoStore::count_collected_by(pool, user.id).await?;

    let (is_following, is_followed_by) = match viewer {
        Some(viewer) if viewer.id != user.id => (
            Some(FollowStore::is_following(pool, viewer.id, user.id).await?),
            Some(FollowStore::is_following(pool, user.id, viewer.id).await?),
        ),
        _ => (None, None),
    };

    Ok(UserProfile {
        id: user.id,
        username: user.username,
        name: user.name,
        website: user.website,
        bio: user.bio,
        location: user.location,
        member_since: user.member_since,
        locked: user.locked,
        avatar_m: user.avatar_m,
        photos_count,
        followers_count,
        following_count,
        collections_count,
        is_following,
        is_followed_by,
    })
}

/// A user's photos, newest first.
pub async fn user_photos(
    pool: &PgPool,
    username: &str,
    per_page: i64,
    page: i64,
) -> Result<Page<Photo>, UsersError> {
    let user = get_user_by_username(pool, username).await?;
    let offset = page_offset(page, per_page);
    let items = PhotoStore::page_by_author(pool, user.id, per_page, offset).await?;
    let total = PhotoStore::count_by_author(pool, user.id).await?;
    Ok(Page::new(items, page, per_page, total))
}

//================================================================================
// Settings
//================================================================================

pub async fn edit_profile(
    pool: &PgPool,
    user: &User,
    payload: &EditProfilePayload,
) -> Result<User, UsersError> {
    validate_username(&payload.username).map_err(|_| {
        UsersError::Validation(
            "The username should contain only a-z, A-Z and 0-9 (1-20 characters)".to_owned(),
        )
    })?;
    if payload.username != user.username
        && UserStore::username_exists(pool, &payload.username).await?
    {
        return Err(UsersError::UsernameTaken);
    }
    if payload.bio.as_deref().is_some_and(|b| b.len() > 120) {
        return Err(UsersError::Validation(
            "The bio must be 120 characters or fewer.".to_owned(),
        ));
    }

    Ok(UserStore::update_profile(
        pool,
        user.id,
        &payload.username,
        payload.name.clone(),
        payload.website.clone(),
        payload.bio.clone(),
        payload.location.clone(),
    )
    .await?)
}

pub async fn update_notification_settings(
    pool: &PgPool,
    user: &User,
    payload: &NotificationSettingPayload,
) -> Result<User, UsersError> {
    Ok(UserStore::update_notification_settings(
        pool,
        user.id,
        payload.receive_comment_notification,
        payload.receive_follow_notification,
        payload.receive_collect_notification,
    )
    .await?)
}

pub async fn update_privacy(
    pool: &PgPool,
    user: &User,
    payload: &PrivacySettingPayload,
) -> Result<User, UsersError> {
    Ok(UserStore::update_privacy(pool, user.id, payload.public_collections).await?)
}

/// Stores a new avatar and its three square derivatives.
pub async fn upload_avatar(
    pool: &PgPool,
    uploads: &UploadSettings,
    user: &User,
    original_name: &str,
    bytes: Vec<u8>,
) -> Result<User, UsersError> {
    if !user.confirmed {
        return Err(UsersError::NotConfirmed);
    }
    if !uploads.is_allowed_photo(original_name) {
        return Err(UsersError::InvalidImage);
    }

    let filename = unique_filename(original_name);
    fs::create_dir_all(&uploads.avatar_folder)
        .await
        .map_err(|e| eyre!(e))?;
    fs::write(uploads.avatar_folder.join(&filename), &bytes)
        .await
        .map_err(|e| eyre!(e))?;

    let avatar_folder = uploads.avatar_folder.clone();
    let sizes = uploads.avatar_sizes;
    let original = filename.clone();
    let derived = task::spawn_blocking(move || -> Result<(String, String, String), UsersError> {
        let img = image::load_from_memory(&bytes).map_err(|_| UsersError::InvalidImage)?;
        let mut names = Vec::with_capacity(3);
        for (suffix, size) in [("_s", sizes.small), ("_m", sizes.medium), ("_l", sizes.large)] {
            // Avatars are square crops of the shorter edge, then scaled.
            let side = img.width().min(img.height());
            let x = (img.width() - side) / 2;
            let y = (img.height() - side) / 2;
            let cropped = img.crop_imm(x, y, side, side);
            let scaled = resize_rgb(&cropped, size, size)?;
            let name = suffixed_filename(&original, suffix);
            scaled
                .save(avatar_folder.join(&name))
                .map_err(|e| UsersError::Internal(eyre!(e)))?;
            names.push(name);
        }
        Ok((names[0].clone(), names[1].clone(), names[2].clone()))
    })
    .await?;
    let (small, medium, large) = derived?;

    UserStore::set_avatar_raw(pool, user.id, &filename).await?;
    UserStore::set_avatar_derivatives(pool, user.id, &small, &medium, &large).await?;
    info!("User {} uploaded a new avatar", user.username);

    UserStore::find_by_id(pool, user.id)
        .await?
        .ok_or_else(|| UsersError::UserNotFound(user.username.clone()))
}

/// Removes the account; photos, comments, edges and notifications
/// cascade with it. Stored photo files of the user are removed after
/// the row is gone.
pub async fn delete_account(
    pool: &PgPool,
    uploads: &UploadSettings,
    user: &User,
) -> Result<(), UsersError> {
    let mut filenames: Vec<String> = Vec::new();
    let mut page = 1;
    loop {
        let photos = PhotoStore::page_by_author(pool, user.id, 100, page_offset(page, 100)).await?;
        if photos.is_empty() {
            break;
        }
        for photo in &photos {
            filenames.extend(photo.distinct_files().iter().map(|s| (*s).to_owned()));
        }
        page += 1;
    }

    UserStore::delete(pool, user.id).await?;
    info!("Account {} deleted", user.username);

    for name in filenames {
        let path = uploads.upload_folder.join(&name);
        if let Err(e) = fs::remove_file(&path).await {
            tracing::warn!("Could not remove file {}: {e}", path.display());
        }
    }
    Ok(())
}
