use crate::api_state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use common_services::api::notifications::error::NotificationsError;
use common_services::api::notifications::interfaces::{
    CountResponse, NotificationFilter, NotificationsQuery,
};
use common_services::api::notifications::service;
use common_services::api::pagination::Page;
use common_services::api::social::interfaces::MessageResponse;
use common_services::database::app_user::User;
use common_services::database::notification::Notification;

/// The user's notifications, newest first. `filter=unread` restricts to
/// unread ones.
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    params(NotificationsQuery),
    responses((status = 200, description = "One page of notifications.", body = Page<Notification>)),
    security(("bearer_auth" = []))
)]
pub async fn list_notifications(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Query(query): Query<NotificationsQuery>,
) -> Result<Json<Page<Notification>>, NotificationsError> {
    let unread_only = query.filter == Some(NotificationFilter::Unread);
    let page = service::list_notifications(
        &context.pool,
        &user,
        unread_only,
        context.settings.pagination.notifications,
        query.page.unwrap_or(1).max(1),
    )
    .await?;
    Ok(Json(page))
}

/// The number of unread notifications.
#[utoipa::path(
    get,
    path = "/notifications/count",
    tag = "Notifications",
    responses((status = 200, description = "Unread count.", body = CountResponse)),
    security(("bearer_auth" = []))
)]
pub async fn unread_count(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<CountResponse>, NotificationsError> {
    let count = service::unread_count(&context.pool, &user).await?;
    Ok(Json(CountResponse { count }))
}

pub async fn read_notification(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(notification_id): Path<i32>,
) -> Result<Json<MessageResponse>, NotificationsError> {
    service::read_notification(&context.pool, &user, notification_id).await?;
    Ok(Json(MessageResponse::new("Notification archived.")))
}

pub async fn read_all_notifications(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<MessageResponse>, NotificationsError> {
    service::read_all_notifications(&context.pool, &user).await?;
    Ok(Json(MessageResponse::new("All notifications archived.")))
}
