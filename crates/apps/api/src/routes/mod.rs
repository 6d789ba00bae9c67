pub mod admin;
mod api_doc;
pub mod auth;
pub mod comments;
pub mod notifications;
pub mod photos;
pub mod root;
pub mod search;
pub mod users;

use crate::api_state::ApiContext;
use crate::routes::admin::router::{admin_administrator_router, admin_moderator_router};
use crate::routes::api_doc::ApiDoc;
use crate::routes::auth::middlewares::require_permission::require_permission;
use crate::routes::auth::middlewares::user::ApiUser;
use crate::routes::auth::router::{auth_protected_router, auth_public_router};
use crate::routes::comments::router::{comments_protected_router, comments_public_router};
use crate::routes::notifications::router::notifications_protected_router;
use crate::routes::photos::router::{photos_protected_router, photos_public_router};
use crate::routes::root::router::root_public_router;
use crate::routes::search::router::search_public_router;
use crate::routes::users::router::{users_protected_router, users_public_router};
use app_state::RateLimitingSettings;
use axum::middleware::{from_extractor_with_state, from_fn_with_state};
use axum::Router;
use common_services::database::app_user::Permission;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(public_routes(&api_state.settings.api.rate_limiting))
        .merge(protected_routes(api_state.clone()))
        .merge(moderator_routes(api_state.clone()))
        .merge(administrator_routes(api_state.clone()))
        .with_state(api_state)
}

fn public_routes(rate_limiting: &RateLimitingSettings) -> Router<ApiContext> {
    Router::new()
        .merge(auth_public_router(rate_limiting))
        .merge(root_public_router())
        .merge(photos_public_router())
        .merge(comments_public_router())
        .merge(users_public_router())
        .merge(search_public_router())
}

fn protected_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(auth_protected_router())
        .merge(photos_protected_router())
        .merge(comments_protected_router())
        .merge(users_protected_router())
        .merge(notifications_protected_router())
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}

fn moderator_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(admin_moderator_router())
        .route_layer(from_fn_with_state(Permission::Moderate, require_permission))
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}

fn administrator_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(admin_administrator_router())
        .route_layer(from_fn_with_state(
            Permission::Administer,
            require_permission,
        ))
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}
