use crate::api_state::ApiContext;
use crate::routes::photos::handlers::{
    add_tags, collect_photo, delete_photo, edit_description, explore, feed, get_photo,
    next_photo, photo_collectors, photos_by_tag, popular_tags, previous_photo, remove_tag,
    report_photo, toggle_comments, uncollect_photo, upload_photo,
};
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, patch, post};
use axum::Router;

const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn photos_public_router() -> Router<ApiContext> {
    Router::new()
        .route("/explore", get(explore))
        .route("/photos/{id}", get(get_photo))
        .route("/photos/{id}/next", get(next_photo))
        .route("/photos/{id}/previous", get(previous_photo))
        .route("/photos/{id}/collectors", get(photo_collectors))
        .route("/tags/popular", get(popular_tags))
        .route("/tags/{id}/photos", get(photos_by_tag))
}

pub fn photos_protected_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/photos",
            post(upload_photo).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/feed", get(feed))
        .route("/photos/{id}/delete", post(delete_photo))
        .route("/photos/{id}/description", patch(edit_description))
        .route("/photos/{id}/toggle-comments", post(toggle_comments))
        .route("/photos/{id}/report", post(report_photo))
        .route("/photos/{id}/tags", post(add_tags))
        .route("/photos/{id}/tags/{tag_id}", delete(remove_tag))
        .route(
            "/photos/{id}/collect",
            post(collect_photo).delete(uncollect_photo),
        )
}
