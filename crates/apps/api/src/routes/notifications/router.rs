use crate::api_state::ApiContext;
use crate::routes::notifications::handlers::{
    list_notifications, read_all_notifications, read_notification, unread_count,
};
use axum::routing::{get, post};
use axum::Router;

pub fn notifications_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/count", get(unread_count))
        .route("/notifications/{id}/read", post(read_notification))
        .route("/notifications/read-all", post(read_all_notifications))
}
