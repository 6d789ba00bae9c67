use crate::api::pagination::Page;
use crate::api::photos::error::PhotosError;
use crate::api::photos::interfaces::PhotoDetail;
use crate::api::users::interfaces::UserCard;
use crate::database::app_user::{Permission, User};
use crate::database::collect_store::CollectStore;
use crate::database::comment_store::CommentStore;
use crate::database::photo::{Photo, PhotoTagOrder};
use crate::database::photo_store::PhotoStore;
use crate::database::tag::Tag;
use crate::database::tag_store::TagStore;
use crate::database::user_store::UserStore;
use crate::images::derive_photo_file;
use crate::{page_offset, unique_filename};
use app_state::UploadSettings;
use color_eyre::eyre::eyre;
use sqlx::PgPool;
use tokio::{fs, task};
use tracing::{info, warn};

/// Fetches a photo or fails with 404.
pub async fn get_photo(pool: &PgPool, photo_id: i32) -> Result<Photo, PhotosError> {
    PhotoStore::find_by_id(pool, photo_id)
        .await?
        .ok_or(PhotosError::PhotoNotFound(photo_id))
}

/// A photo with author card, tags and counts for its detail view.
pub async fn get_photo_detail(pool: &PgPool, photo_id: i32) -> Result<PhotoDetail, PhotosError> {
    let photo = get_photo(pool, photo_id).await?;
    let author = UserStore::find_by_id(pool, photo.author_id)
        .await?
        .ok_or(PhotosError::PhotoNotFound(photo_id))?;
    let tags = TagStore::tags_of_photo(pool, photo_id).await?;
    let comments_count = CommentStore::count_by_photo(pool, photo_id).await?;
    let collectors_count = CollectStore::collectors_count(pool, photo_id).await?;
    Ok(PhotoDetail {
        author: UserCard::from(&author),
        photo,
        tags,
        comments_count,
        collectors_count,
    })
}

/// Persists an upload: the original under a generated unique name, then
/// the two width-bounded derivatives, then the row.
///
/// # Errors
///
/// * `PhotosError::NotConfirmed` / `PermissionDenied` on gating.
/// * `PhotosError::InvalidImage` when the extension or content is not a
///   decodable image.
pub async fn upload_photo(
    pool: &PgPool,
    uploads: &UploadSettings,
    user: &User,
    original_name: &str,
    bytes: Vec<u8>,
    description: Option<String>,
) -> Result<Photo, PhotosError> {
    if !user.confirmed {
        return Err(PhotosError::NotConfirmed);
    }
    if !user.can(Permission::Upload) {
        return Err(PhotosError::PermissionDenied);
    }
    if !uploads.is_allowed_photo(original_name) {
        return Err(PhotosError::InvalidImage);
    }
    validate_description(description.as_deref())?;

    let filename = unique_filename(original_name);
    fs::create_dir_all(&uploads.upload_folder)
        .await
        .map_err(|e| eyre!(e))?;
    fs::write(uploads.upload_folder.join(&filename), &bytes)
        .await
        .map_err(|e| eyre!(e))?;

    // Decoding and resizing are CPU-bound; keep them off the runtime.
    let upload_folder = uploads.upload_folder.clone();
    let sizes = uploads.photo_sizes;
    let suffixes = uploads.photo_suffixes.clone();
    let original = filename.clone();
    let derivatives = task::spawn_blocking(move || -> Result<(String, String), PhotosError> {
        let img = image::load_from_memory(&bytes).map_err(|_| PhotosError::InvalidImage)?;
        let small = derive_photo_file(&img, &upload_folder, &original, &suffixes.small, sizes.small)?;
        let medium =
            derive_photo_file(&img, &upload_folder, &original, &suffixes.medium, sizes.medium)?;
        Ok((small, medium))
    })
    .await?;

    let (filename_s, filename_m) = match derivatives {
        Ok(names) => names,
        Err(e) => {
            // The original was already written; do not leave it behind.
            fs::remove_file(uploads.upload_folder.join(&filename)).await.ok();
            return Err(e);
        }
    };

    let photo = PhotoStore::create(
        pool,
        user.id,
        &filename,
        &filename_s,
        &filename_m,
        description,
    )
    .await?;
    info!("User {} uploaded photo {}", user.username, photo.id);
    Ok(photo)
}

fn validate_description(description: Option<&str>) -> Result<(), PhotosError> {
    match description {
        Some(d) if d.len() > 500 => Err(PhotosError::Validation(
            "The description must be 500 characters or fewer.".to_owned(),
        )),
        _ => Ok(()),
    }
}

fn ensure_author_or_moderator(user: &User, photo: &Photo) -> Result<(), PhotosError> {
    if user.id == photo.author_id || user.can(Permission::Moderate) {
        Ok(())
    } else {
        Err(PhotosError::PermissionDenied)
    }
}

pub async fn edit_description(
    pool: &PgPool,
    user: &User,
    photo_id: i32,
    description: Option<String>,
) -> Result<Photo, PhotosError> {
    let photo = get_photo(pool, photo_id).await?;
    ensure_author_or_moderator(user, &photo)?;
    validate_description(description.as_deref())?;
    Ok(PhotoStore::update_description(pool, photo_id, description).await?)
}

pub async fn toggle_comments(
    pool: &PgPool,
    user: &User,
    photo_id: i32,
) -> Result<Photo, PhotosError> {
    let photo = get_photo(pool, photo_id).await?;
    ensure_author_or_moderator(user, &photo)?;
    Ok(PhotoStore::toggle_can_comment(pool, photo_id).await?)
}

pub async fn report_photo(pool: &PgPool, user: &User, photo_id: i32) -> Result<(), PhotosError> {
    if !user.confirmed {
        return Err(PhotosError::NotConfirmed);
    }
    get_photo(pool, photo_id).await?;
    PhotoStore::increment_flag(pool, photo_id).await?;
    Ok(())
}

/// Deletes the row first, then removes the stored files. File removal is
/// a side effect after the commit; failures are logged and not rolled
/// back.
pub async fn delete_photo(
    pool: &PgPool,
    uploads: &UploadSettings,
    user: &User,
    photo_id: i32,
) -> Result<(), PhotosError> {
    let photo = get_photo(pool, photo_id).await?;
    ensure_author_or_moderator(user, &photo)?;

    let tags = TagStore::tags_of_photo(pool, photo_id).await?;
    let tag_ids: Vec<i32> = tags.iter().map(|t| t.id).collect();

    PhotoStore::delete(pool, photo_id).await?;
    if !tag_ids.is_empty() {
        TagStore::delete_orphans(pool, &tag_ids).await?;
    }

    for name in photo.distinct_files() {
        let path = uploads.upload_folder.join(name);
        if let Err(e) = fs::remove_file(&path).await {
            warn!("Could not remove file {} of photo {}: {e}", path.display(), photo_id);
        }
    }
    info!("Photo {} deleted by {}", photo_id, user.username);
    Ok(())
}

/// The author's next photo by id.
pub async fn next_photo(pool: &PgPool, photo_id: i32) -> Result<Option<Photo>, PhotosError> {
    let photo = get_photo(pool, photo_id).await?;
    Ok(PhotoStore::next_of(pool, photo.author_id, photo_id).await?)
}

/// The author's previous photo by id.
pub async fn previous_photo(pool: &PgPool, photo_id: i32) -> Result<Option<Photo>, PhotosError> {
    let photo = get_photo(pool, photo_id).await?;
    Ok(PhotoStore::previous_of(pool, photo.author_id, photo_id).await?)
}

//================================================================================
// Feeds
//================================================================================

/// Photos of the users the given user follows, newest first.
pub async fn feed(
    pool: &PgPool,
    user: &User,
    per_page: i64,
    page: i64,
) -> Result<Page<Photo>, PhotosError> {
    let offset = page_offset(page, per_page);
    let items = PhotoStore::feed_page(pool, user.id, per_page, offset).await?;
    let total = PhotoStore::feed_count(pool, user.id).await?;
    Ok(Page::new(items, page, per_page, total))
}

/// A random selection for the explore page.
pub async fn explore(pool: &PgPool, limit: i64) -> Result<Vec<Photo>, PhotosError> {
    Ok(PhotoStore::random(pool, limit).await?)
}

//================================================================================
// Tags
//================================================================================

/// Attaches whitespace-separated tag names, creating tags on first use.
pub async fn add_tags(
    pool: &PgPool,
    user: &User,
    photo_id: i32,
    tags: &str,
) -> Result<Vec<Tag>, PhotosError> {
    let photo = get_photo(pool, photo_id).await?;
    ensure_author_or_moderator(user, &photo)?;

    for name in tags.split_whitespace() {
        if name.len() > 64 {
            return Err(PhotosError::Validation(
                "Tag names must be 64 characters or fewer.".to_owned(),
            ));
        }
        let tag = TagStore::find_or_create(pool, name).await?;
        TagStore::link(pool, photo_id, tag.id).await?;
    }
    Ok(TagStore::tags_of_photo(pool, photo_id).await?)
}

/// Unlinks a tag from a photo; a tag left without photos is deleted.
pub async fn remove_tag(
    pool: &PgPool,
    user: &User,
    photo_id: i32,
    tag_id: i32,
) -> Result<(), PhotosError> {
    let photo = get_photo(pool, photo_id).await?;
    ensure_author_or_moderator(user, &photo)?;
    TagStore::find_by_id(pool, tag_id)
        .await?
        .ok_or(PhotosError::TagNotFound(tag_id))?;

    TagStore::unlink(pool, photo_id, tag_id).await?;
    TagStore::delete_orphans(pool, &[tag_id]).await?;
    Ok(())
}

/// Photos within a tag, by time or by collector count.
pub async fn photos_by_tag(
    pool: &PgPool,
    tag_id: i32,
    order: PhotoTagOrder,
    per_page: i64,
    page: i64,
) -> Result<(Tag, Page<Photo>), PhotosError> {
    let tag = TagStore::find_by_id(pool, tag_id)
        .await?
        .ok_or(PhotosError::TagNotFound(tag_id))?;
    let offset = page_offset(page, per_page);
    let items = PhotoStore::page_by_tag(pool, tag_id, order, per_page, offset).await?;
    let total = PhotoStore::count_by_tag(pool, tag_id).await?;
    Ok((tag, Page::new(items, page, per_page, total)))
}

/// The most used tags for the landing page.
pub async fn popular_tags(pool: &PgPool, limit: i64) -> Result<Vec<Tag>, PhotosError> {
    Ok(TagStore::popular(pool, limit).await?)
}
