use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// Represents a user account.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub website: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub member_since: DateTime<Utc>,
    pub confirmed: bool,
    pub locked: bool,
    pub active: bool,
    pub role: UserRole,
    pub avatar_raw: Option<String>,
    pub avatar_s: Option<String>,
    pub avatar_m: Option<String>,
    pub avatar_l: Option<String>,
    pub receive_comment_notification: bool,
    pub receive_follow_notification: bool,
    pub receive_collect_notification: bool,
    pub public_collections: bool,
}

/// A user record including the password hash. Never serialized.
#[derive(Debug, FromRow)]
pub struct UserWithPassword {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub confirmed: bool,
    pub active: bool,
    pub role: UserRole,
}

/// Maps to the `user_role` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Locked,
    User,
    Moderator,
    Administrator,
}

/// An atomic named capability. The `permission` table carries the same
/// names as reference data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    Follow,
    Collect,
    Comment,
    Upload,
    Moderate,
    Administer,
}

impl Permission {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Follow => "FOLLOW",
            Self::Collect => "COLLECT",
            Self::Comment => "COMMENT",
            Self::Upload => "UPLOAD",
            Self::Moderate => "MODERATE",
            Self::Administer => "ADMINISTER",
        }
    }
}

impl UserRole {
    /// The capability bundle of each role. Must match the seed in
    /// `migrations/0002_seed_roles.sql`.
    #[must_use]
    pub const fn permissions(self) -> &'static [Permission] {
        use Permission::{Administer, Collect, Comment, Follow, Moderate, Upload};
        match self {
            Self::Locked => &[Follow, Collect],
            Self::User => &[Follow, Collect, Comment, Upload],
            Self::Moderator => &[Follow, Collect, Comment, Upload, Moderate],
            Self::Administrator => &[Follow, Collect, Comment, Upload, Moderate, Administer],
        }
    }

    #[must_use]
    pub fn can(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    /// The role name as seeded in the `role` table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locked => "Locked",
            Self::User => "User",
            Self::Moderator => "Moderator",
            Self::Administrator => "Administrator",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl User {
    #[must_use]
    pub fn can(&self, permission: Permission) -> bool {
        self.role.can(permission)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Administrator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_map_matches_seed_exactly() {
        use Permission::{Administer, Collect, Comment, Follow, Moderate, Upload};
        assert_eq!(UserRole::Locked.permissions(), &[Follow, Collect]);
        assert_eq!(
            UserRole::User.permissions(),
            &[Follow, Collect, Comment, Upload]
        );
        assert_eq!(
            UserRole::Moderator.permissions(),
            &[Follow, Collect, Comment, Upload, Moderate]
        );
        assert_eq!(
            UserRole::Administrator.permissions(),
            &[Follow, Collect, Comment, Upload, Moderate, Administer]
        );
    }

    #[test]
    fn roles_form_a_strict_hierarchy() {
        let order = [
            UserRole::Locked,
            UserRole::User,
            UserRole::Moderator,
            UserRole::Administrator,
        ];
        for pair in order.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            for permission in lower.permissions() {
                assert!(higher.can(*permission), "{higher} should subsume {lower}");
            }
            assert!(lower.permissions().len() < higher.permissions().len());
        }
    }

    #[test]
    fn locked_users_cannot_upload_or_comment() {
        assert!(!UserRole::Locked.can(Permission::Upload));
        assert!(!UserRole::Locked.can(Permission::Comment));
        assert!(UserRole::Locked.can(Permission::Follow));
    }
}
