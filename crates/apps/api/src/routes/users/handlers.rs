use crate::api_state::ApiContext;
use crate::routes::auth::middlewares::optional_user::OptionalUser;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use color_eyre::eyre::eyre;
use common_services::api::pagination::{Page, PageQuery};
use common_services::api::social::error::SocialError;
use common_services::api::social::interfaces::MessageResponse;
use common_services::api::social::service as social_service;
use common_services::api::users::error::UsersError;
use common_services::api::users::interfaces::{
    EditProfilePayload, NotificationSettingPayload, PrivacySettingPayload, UserProfile,
};
use common_services::api::users::service;
use common_services::database::app_user::User;
use common_services::database::follow_store::FollowListEntry;
use common_services::database::photo::Photo;
use serde_json::{json, Value};

/// A user's public profile with graph counts.
#[utoipa::path(
    get,
    path = "/users/{username}",
    tag = "Users",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "The profile.", body = UserProfile),
        (status = 404, description = "User not found."),
    )
)]
pub async fn get_profile(
    State(context): State<ApiContext>,
    OptionalUser(viewer): OptionalUser,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, UsersError> {
    let profile = service::get_profile(&context.pool, viewer.as_ref(), &username).await?;
    Ok(Json(profile))
}

/// The compact profile card for popups.
pub async fn get_profile_card(
    State(context): State<ApiContext>,
    OptionalUser(viewer): OptionalUser,
    Path(username): Path<String>,
) -> Result<Json<Value>, UsersError> {
    let profile = service::get_profile(&context.pool, viewer.as_ref(), &username).await?;
    Ok(Json(json!({
        "id": profile.id,
        "username": profile.username,
        "name": profile.name,
        "bio": profile.bio,
        "avatar_m": profile.avatar_m,
        "photos_count": profile.photos_count,
        "followers_count": profile.followers_count,
        "is_following": profile.is_following,
    })))
}

pub async fn user_photos(
    State(context): State<ApiContext>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Photo>>, UsersError> {
    let page = service::user_photos(
        &context.pool,
        &username,
        context.settings.pagination.photos,
        query.page(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn user_collections(
    State(context): State<ApiContext>,
    OptionalUser(viewer): OptionalUser,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Photo>>, SocialError> {
    let page = social_service::collections_page(
        &context.pool,
        viewer.as_ref(),
        &username,
        context.settings.pagination.photos,
        query.page(),
    )
    .await?;
    Ok(Json(page))
}

//================================================================================
// Follow graph
//================================================================================

/// Follow a user.
#[utoipa::path(
    post,
    path = "/users/{username}/follow",
    tag = "Users",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User followed.", body = MessageResponse),
        (status = 400, description = "Already followed or self-follow."),
        (status = 403, description = "Missing FOLLOW permission or unconfirmed account."),
        (status = 404, description = "User not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn follow_user(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, SocialError> {
    social_service::follow(
        &context.pool,
        &context.settings.api.public_url,
        &user,
        &username,
    )
    .await?;
    Ok(Json(MessageResponse::new("User followed.")))
}

/// Unfollow a user.
#[utoipa::path(
    delete,
    path = "/users/{username}/follow",
    tag = "Users",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User unfollowed.", body = MessageResponse),
        (status = 400, description = "Not followed yet."),
        (status = 404, description = "User not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn unfollow_user(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, SocialError> {
    social_service::unfollow(&context.pool, &user, &username).await?;
    Ok(Json(MessageResponse::new("User unfollowed.")))
}

pub async fn followers(
    State(context): State<ApiContext>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<FollowListEntry>>, SocialError> {
    let page = social_service::followers_page(
        &context.pool,
        &username,
        context.settings.pagination.users,
        query.page(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn following(
    State(context): State<ApiContext>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<FollowListEntry>>, SocialError> {
    let page = social_service::following_page(
        &context.pool,
        &username,
        context.settings.pagination.users,
        query.page(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn followers_count(
    State(context): State<ApiContext>,
    Path(username): Path<String>,
) -> Result<Json<Value>, SocialError> {
    let count = social_service::followers_count(&context.pool, &username).await?;
    Ok(Json(json!({ "count": count })))
}

//================================================================================
// Settings
//================================================================================

pub async fn edit_profile(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<EditProfilePayload>,
) -> Result<Json<User>, UsersError> {
    let updated = service::edit_profile(&context.pool, &user, &payload).await?;
    Ok(Json(updated))
}

pub async fn notification_settings(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<NotificationSettingPayload>,
) -> Result<Json<User>, UsersError> {
    let updated = service::update_notification_settings(&context.pool, &user, &payload).await?;
    Ok(Json(updated))
}

pub async fn privacy_settings(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<PrivacySettingPayload>,
) -> Result<Json<User>, UsersError> {
    let updated = service::update_privacy(&context.pool, &user, &payload).await?;
    Ok(Json(updated))
}

/// Upload a new avatar (multipart: `image`).
pub async fn upload_avatar(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    mut multipart: Multipart,
) -> Result<Json<User>, UsersError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UsersError::Internal(eyre!(e)))?
    {
        if field.name() == Some("image") {
            let name = field.file_name().unwrap_or("avatar").to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| UsersError::Internal(eyre!(e)))?
                .to_vec();
            file = Some((name, bytes));
        }
    }
    let (name, bytes) =
        file.ok_or_else(|| UsersError::Validation("Missing image field.".to_owned()))?;

    let updated = service::upload_avatar(
        &context.pool,
        &context.settings.uploads,
        &user,
        &name,
        bytes,
    )
    .await?;
    Ok(Json(updated))
}

pub async fn delete_account(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, UsersError> {
    service::delete_account(&context.pool, &context.settings.uploads, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
