use crate::api_state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::comments::error::CommentsError;
use common_services::api::comments::interfaces::{CommentEntry, NewCommentPayload};
use common_services::api::comments::service;
use common_services::api::pagination::{Page, PageQuery};
use common_services::api::social::interfaces::MessageResponse;
use common_services::database::app_user::User;
use common_services::database::comment::Comment;

/// Comments of a photo in posting order.
#[utoipa::path(
    get,
    path = "/photos/{id}/comments",
    tag = "Comments",
    params(("id" = i32, Path, description = "Photo id"), PageQuery),
    responses(
        (status = 200, description = "One page of comments.", body = Page<CommentEntry>),
        (status = 404, description = "Photo not found."),
    )
)]
pub async fn list_comments(
    State(context): State<ApiContext>,
    Path(photo_id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<CommentEntry>>, CommentsError> {
    let page = service::list_comments(
        &context.pool,
        photo_id,
        context.settings.pagination.comments,
        query.page(),
    )
    .await?;
    Ok(Json(page))
}

/// Publish a comment, optionally as a reply to another comment.
#[utoipa::path(
    post,
    path = "/photos/{id}/comments/new",
    tag = "Comments",
    params(("id" = i32, Path, description = "Photo id")),
    request_body = NewCommentPayload,
    responses(
        (status = 200, description = "The created comment.", body = Comment),
        (status = 403, description = "Comments disabled, unconfirmed account or missing permission."),
        (status = 404, description = "Photo or replied comment not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_comment(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(photo_id): Path<i32>,
    Json(payload): Json<NewCommentPayload>,
) -> Result<Json<Comment>, CommentsError> {
    let comment = service::create_comment(
        &context.pool,
        &context.settings.api.public_url,
        &user,
        photo_id,
        &payload.body,
        payload.reply_to,
    )
    .await?;
    Ok(Json(comment))
}

pub async fn report_comment(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(comment_id): Path<i32>,
) -> Result<Json<MessageResponse>, CommentsError> {
    service::report_comment(&context.pool, &user, comment_id).await?;
    Ok(Json(MessageResponse::new("Comment reported.")))
}

pub async fn delete_comment(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(comment_id): Path<i32>,
) -> Result<StatusCode, CommentsError> {
    service::delete_comment(&context.pool, &user, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
