use crate::api_state::ApiContext;
use crate::routes::admin::handlers::{
    block_user, list_roles, list_users, lock_user, set_role, unblock_user, unlock_user,
};
use axum::routing::{get, post, put};
use axum::Router;

pub fn admin_moderator_router() -> Router<ApiContext> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}/lock", post(lock_user))
        .route("/admin/users/{id}/unlock", post(unlock_user))
        .route("/admin/users/{id}/block", post(block_user))
        .route("/admin/users/{id}/unblock", post(unblock_user))
}

pub fn admin_administrator_router() -> Router<ApiContext> {
    Router::new()
        .route("/admin/users/{id}/role", put(set_role))
        .route("/admin/roles", get(list_roles))
}
