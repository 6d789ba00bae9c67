use crate::api_state::ApiContext;
use crate::routes::comments::handlers::{
    create_comment, delete_comment, list_comments, report_comment,
};
use axum::routing::{get, post};
use axum::Router;

pub fn comments_public_router() -> Router<ApiContext> {
    Router::new().route("/photos/{id}/comments", get(list_comments))
}

pub fn comments_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/photos/{id}/comments/new", post(create_comment))
        .route("/comments/{id}/report", post(report_comment))
        .route("/comments/{id}/delete", post(delete_comment))
}
