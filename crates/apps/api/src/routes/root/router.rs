use crate::api_state::ApiContext;
use crate::routes::root::handlers::{health, root};
use axum::routing::get;
use axum::Router;

pub fn root_public_router() -> Router<ApiContext> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
