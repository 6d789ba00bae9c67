use crate::database::app_user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The public face of a user, embedded in photo details, comment
/// listings and the profile popup.
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct UserCard {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_s: Option<String>,
}

impl From<&User> for UserCard {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            bio: user.bio.clone(),
            avatar_s: user.avatar_s.clone(),
        }
    }
}

/// A full profile page: public fields plus graph counts.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
    pub website: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub member_since: DateTime<Utc>,
    pub locked: bool,
    pub avatar_m: Option<String>,
    pub photos_count: i64,
    pub followers_count: i64,
    pub following_count: i64,
    pub collections_count: i64,
    /// Whether the requesting user follows this one; absent for
    /// anonymous requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_followed_by: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EditProfilePayload {
    pub username: String,
    pub name: Option<String>,
    pub website: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NotificationSettingPayload {
    pub receive_comment_notification: bool,
    pub receive_follow_notification: bool,
    pub receive_collect_notification: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PrivacySettingPayload {
    pub public_collections: bool,
}
