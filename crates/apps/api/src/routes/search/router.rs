use crate::api_state::ApiContext;
use crate::routes::search::handlers::search;
use axum::routing::get;
use axum::Router;

pub fn search_public_router() -> Router<ApiContext> {
    Router::new().route("/search", get(search))
}
