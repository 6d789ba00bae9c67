use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFilter {
    All,
    Unread,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct NotificationsQuery {
    pub page: Option<i64>,
    /// `unread` restricts the listing to unread notifications.
    pub filter: Option<NotificationFilter>,
}
