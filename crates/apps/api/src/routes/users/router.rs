use crate::api_state::ApiContext;
use crate::routes::users::handlers::{
    delete_account, edit_profile, follow_user, followers, followers_count, following,
    get_profile, get_profile_card, notification_settings, privacy_settings, unfollow_user,
    upload_avatar, user_collections, user_photos,
};
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;

const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Profile pages are public; the optional viewer only enriches them
/// (follow flags, private collection access).
pub fn users_public_router() -> Router<ApiContext> {
    Router::new()
        .route("/users/{username}", get(get_profile))
        .route("/users/{username}/card", get(get_profile_card))
        .route("/users/{username}/photos", get(user_photos))
        .route("/users/{username}/collections", get(user_collections))
        .route("/users/{username}/followers", get(followers))
        .route("/users/{username}/followers/count", get(followers_count))
        .route("/users/{username}/following", get(following))
}

pub fn users_protected_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/users/{username}/follow",
            post(follow_user).delete(unfollow_user),
        )
        .route("/settings/profile", put(edit_profile))
        .route("/settings/notifications", put(notification_settings))
        .route("/settings/privacy", put(privacy_settings))
        .route(
            "/settings/avatar",
            post(upload_avatar).layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES)),
        )
        .route("/settings/account", delete(delete_account))
}
