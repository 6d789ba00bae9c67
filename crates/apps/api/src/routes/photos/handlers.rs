use crate::api_state::ApiContext;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use color_eyre::eyre::eyre;
use common_services::api::pagination::{Page, PageQuery};
use common_services::api::photos::error::PhotosError;
use common_services::api::photos::interfaces::{
    DescriptionPayload, PhotoDetail, TagPhotosQuery, TagsPayload,
};
use common_services::api::photos::service;
use common_services::api::social::error::SocialError;
use common_services::api::social::interfaces::MessageResponse;
use common_services::api::social::service as social_service;
use common_services::database::app_user::User;
use common_services::database::follow_store::FollowListEntry;
use common_services::database::photo::Photo;
use common_services::database::tag::Tag;
use serde_json::{json, Value};

/// A photo with author, tags and counts.
#[utoipa::path(
    get,
    path = "/photos/{id}",
    tag = "Photos",
    params(("id" = i32, Path, description = "Photo id")),
    responses(
        (status = 200, description = "The photo detail.", body = PhotoDetail),
        (status = 404, description = "Photo not found."),
    )
)]
pub async fn get_photo(
    State(context): State<ApiContext>,
    Path(photo_id): Path<i32>,
) -> Result<Json<PhotoDetail>, PhotosError> {
    let detail = service::get_photo_detail(&context.pool, photo_id).await?;
    Ok(Json(detail))
}

/// Upload a photo (multipart: `file` plus optional `description`).
#[utoipa::path(
    post,
    path = "/photos",
    tag = "Photos",
    responses(
        (status = 200, description = "The created photo.", body = Photo),
        (status = 400, description = "Not an accepted image."),
        (status = 403, description = "Missing UPLOAD permission or unconfirmed account."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_photo(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    mut multipart: Multipart,
) -> Result<Json<Photo>, PhotosError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PhotosError::Internal(eyre!(e)))?
    {
        let field_name = field.name().map(ToOwned::to_owned);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or("upload").to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| PhotosError::Internal(eyre!(e)))?
                    .to_vec();
                file = Some((name, bytes));
            }
            Some("description") => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| PhotosError::Internal(eyre!(e)))?,
                );
            }
            _ => {}
        }
    }

    let (name, bytes) =
        file.ok_or_else(|| PhotosError::Validation("Missing file field.".to_owned()))?;
    let photo = service::upload_photo(
        &context.pool,
        &context.settings.uploads,
        &user,
        &name,
        bytes,
        description.filter(|d| !d.is_empty()),
    )
    .await?;
    Ok(Json(photo))
}

pub async fn edit_description(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
    Json(payload): Json<DescriptionPayload>,
) -> Result<Json<Photo>, PhotosError> {
    let photo =
        service::edit_description(&context.pool, &user, photo_id, payload.description).await?;
    Ok(Json(photo))
}

pub async fn toggle_comments(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
) -> Result<Json<Photo>, PhotosError> {
    let photo = service::toggle_comments(&context.pool, &user, photo_id).await?;
    Ok(Json(photo))
}

pub async fn report_photo(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
) -> Result<Json<MessageResponse>, PhotosError> {
    service::report_photo(&context.pool, &user, photo_id).await?;
    Ok(Json(MessageResponse::new("Photo reported.")))
}

/// Delete a photo (author or moderator). Removes its stored files.
#[utoipa::path(
    post,
    path = "/photos/{id}/delete",
    tag = "Photos",
    params(("id" = i32, Path, description = "Photo id")),
    responses(
        (status = 204, description = "Photo deleted."),
        (status = 403, description = "Not the author nor a moderator."),
        (status = 404, description = "Photo not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_photo(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
) -> Result<StatusCode, PhotosError> {
    service::delete_photo(&context.pool, &context.settings.uploads, &user, photo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn next_photo(
    State(context): State<ApiContext>,
    Path(photo_id): Path<i32>,
) -> Result<Json<Option<Photo>>, PhotosError> {
    Ok(Json(service::next_photo(&context.pool, photo_id).await?))
}

pub async fn previous_photo(
    State(context): State<ApiContext>,
    Path(photo_id): Path<i32>,
) -> Result<Json<Option<Photo>>, PhotosError> {
    Ok(Json(service::previous_photo(&context.pool, photo_id).await?))
}

//================================================================================
// Feeds
//================================================================================

/// Photos of followed users, newest first.
#[utoipa::path(
    get,
    path = "/feed",
    tag = "Photos",
    params(PageQuery),
    responses((status = 200, description = "One page of the home feed.", body = Page<Photo>)),
    security(("bearer_auth" = []))
)]
pub async fn feed(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Photo>>, PhotosError> {
    let page = service::feed(
        &context.pool,
        &user,
        context.settings.pagination.photos,
        query.page(),
    )
    .await?;
    Ok(Json(page))
}

/// A random selection of photos.
#[utoipa::path(
    get,
    path = "/explore",
    tag = "Photos",
    responses((status = 200, description = "Random photos.", body = [Photo]))
)]
pub async fn explore(State(context): State<ApiContext>) -> Result<Json<Vec<Photo>>, PhotosError> {
    let photos = service::explore(&context.pool, context.settings.pagination.photos).await?;
    Ok(Json(photos))
}

//================================================================================
// Tags
//================================================================================

pub async fn add_tags(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
    Json(payload): Json<TagsPayload>,
) -> Result<Json<Vec<Tag>>, PhotosError> {
    let tags = service::add_tags(&context.pool, &user, photo_id, &payload.tags).await?;
    Ok(Json(tags))
}

pub async fn remove_tag(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path((photo_id, tag_id)): Path<(i32, i32)>,
) -> Result<StatusCode, PhotosError> {
    service::remove_tag(&context.pool, &user, photo_id, tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Photos within a tag; `order=by_collects` switches to popularity.
#[utoipa::path(
    get,
    path = "/tags/{id}/photos",
    tag = "Photos",
    params(
        ("id" = i32, Path, description = "Tag id"),
        TagPhotosQuery
    ),
    responses(
        (status = 200, description = "The tag and one page of its photos.", body = Value),
        (status = 404, description = "Tag not found."),
    )
)]
pub async fn photos_by_tag(
    State(context): State<ApiContext>,
    Path(tag_id): Path<i32>,
    Query(query): Query<TagPhotosQuery>,
) -> Result<Json<Value>, PhotosError> {
    let (tag, photos) = service::photos_by_tag(
        &context.pool,
        tag_id,
        query.order.unwrap_or_default(),
        context.settings.pagination.photos,
        query.page.unwrap_or(1).max(1),
    )
    .await?;
    Ok(Json(json!({ "tag": tag, "photos": photos })))
}

pub async fn popular_tags(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<Tag>>, PhotosError> {
    Ok(Json(service::popular_tags(&context.pool, 10).await?))
}

//================================================================================
// Collecting
//================================================================================

/// Bookmark a photo.
#[utoipa::path(
    post,
    path = "/photos/{id}/collect",
    tag = "Photos",
    params(("id" = i32, Path, description = "Photo id")),
    responses(
        (status = 200, description = "Photo collected.", body = MessageResponse),
        (status = 400, description = "Already collected."),
        (status = 403, description = "Missing COLLECT permission or unconfirmed account."),
        (status = 404, description = "Photo not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn collect_photo(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
) -> Result<Json<MessageResponse>, SocialError> {
    social_service::collect(
        &context.pool,
        &context.settings.api.public_url,
        &user,
        photo_id,
    )
    .await?;
    Ok(Json(MessageResponse::new("Photo collected.")))
}

pub async fn uncollect_photo(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
) -> Result<Json<MessageResponse>, SocialError> {
    social_service::uncollect(&context.pool, &user, photo_id).await?;
    Ok(Json(MessageResponse::new("Photo uncollected.")))
}

pub async fn photo_collectors(
    State(context): State<ApiContext>,
    Path(photo_id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<FollowListEntry>>, SocialError> {
    let page = social_service::collectors_page(
        &context.pool,
        photo_id,
        context.settings.pagination.collectors,
        query.page(),
    )
    .await?;
    Ok(Json(page))
}
