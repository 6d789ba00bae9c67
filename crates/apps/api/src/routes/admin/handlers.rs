use crate::api_state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use common_services::api::admin::error::AdminError;
use common_services::api::admin::interfaces::SetRolePayload;
use common_services::api::admin::service;
use common_services::api::pagination::{Page, PageQuery};
use common_services::database::app_user::User;
use common_services::database::role::RoleWithPermissions;

/// All accounts, newest first (moderators).
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    params(PageQuery),
    responses((status = 200, description = "One page of users.", body = Page<User>)),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(context): State<ApiContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<User>>, AdminError> {
    let page = service::list_users(
        &context.pool,
        context.settings.pagination.users,
        query.page(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn lock_user(
    State(context): State<ApiContext>,
    Extension(moderator): Extension<User>,
    Path(user_id): Path<i32>,
) -> Result<Json<User>, AdminError> {
    Ok(Json(
        service::lock_user(&context.pool, &moderator, user_id).await?,
    ))
}

pub async fn unlock_user(
    State(context): State<ApiContext>,
    Extension(moderator): Extension<User>,
    Path(user_id): Path<i32>,
) -> Result<Json<User>, AdminError> {
    Ok(Json(
        service::unlock_user(&context.pool, &moderator, user_id).await?,
    ))
}

pub async fn block_user(
    State(context): State<ApiContext>,
    Extension(moderator): Extension<User>,
    Path(user_id): Path<i32>,
) -> Result<Json<User>, AdminError> {
    Ok(Json(
        service::block_user(&context.pool, &moderator, user_id).await?,
    ))
}

pub async fn unblock_user(
    State(context): State<ApiContext>,
    Extension(moderator): Extension<User>,
    Path(user_id): Path<i32>,
) -> Result<Json<User>, AdminError> {
    Ok(Json(
        service::unblock_user(&context.pool, &moderator, user_id).await?,
    ))
}

pub async fn set_role(
    State(context): State<ApiContext>,
    Extension(admin): Extension<User>,
    Path(user_id): Path<i32>,
    Json(payload): Json<SetRolePayload>,
) -> Result<Json<User>, AdminError> {
    Ok(Json(
        service::set_role(&context.pool, &admin, user_id, payload.role).await?,
    ))
}

/// The seeded role/permission reference data.
pub async fn list_roles(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<RoleWithPermissions>>, AdminError> {
    Ok(Json(service::list_roles(&context.pool).await?))
}
