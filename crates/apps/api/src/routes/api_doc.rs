use common_services::api::auth::interfaces::{LoginUser, RegisterUser, Tokens};
use common_services::api::comments::interfaces::CommentEntry;
use common_services::api::notifications::interfaces::CountResponse;
use common_services::api::pagination::Page;
use common_services::api::photos::interfaces::PhotoDetail;
use common_services::api::search::interfaces::SearchResults;
use common_services::api::social::interfaces::MessageResponse;
use common_services::api::users::interfaces::{UserCard, UserProfile};
use common_services::database::app_user::{User, UserRole};
use common_services::database::comment::Comment;
use common_services::database::follow_store::FollowListEntry;
use common_services::database::notification::Notification;
use common_services::database::photo::Photo;
use common_services::database::role::RoleWithPermissions;
use common_services::database::tag::Tag;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::auth::handlers::register,
        crate::routes::auth::handlers::login,
        crate::routes::auth::handlers::refresh_session,
        crate::routes::auth::handlers::get_me,
        crate::routes::photos::handlers::get_photo,
        crate::routes::photos::handlers::upload_photo,
        crate::routes::photos::handlers::delete_photo,
        crate::routes::photos::handlers::feed,
        crate::routes::photos::handlers::explore,
        crate::routes::photos::handlers::photos_by_tag,
        crate::routes::photos::handlers::collect_photo,
        crate::routes::comments::handlers::list_comments,
        crate::routes::comments::handlers::create_comment,
        crate::routes::users::handlers::get_profile,
        crate::routes::users::handlers::follow_user,
        crate::routes::users::handlers::unfollow_user,
        crate::routes::notifications::handlers::list_notifications,
        crate::routes::notifications::handlers::unread_count,
        crate::routes::search::handlers::search,
        crate::routes::admin::handlers::list_users,
    ),
    components(schemas(
        User,
        UserRole,
        UserCard,
        UserProfile,
        Photo,
        PhotoDetail,
        Tag,
        Comment,
        CommentEntry,
        Notification,
        FollowListEntry,
        RoleWithPermissions,
        Tokens,
        RegisterUser,
        LoginUser,
        MessageResponse,
        CountResponse,
        SearchResults,
        Page<Photo>,
        Page<CommentEntry>,
        Page<Notification>,
        Page<User>,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and account flows"),
        (name = "Photos", description = "Upload, browse and curate photos"),
        (name = "Comments", description = "Comment threads on photos"),
        (name = "Users", description = "Profiles and the follow graph"),
        (name = "Notifications", description = "The notification inbox"),
        (name = "Search", description = "Keyword search"),
        (name = "Admin", description = "Moderation and administration"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
