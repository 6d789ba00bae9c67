use crate::api::users::interfaces::UserCard;
use crate::database::comment::Comment;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewCommentPayload {
    pub body: String,
    /// Optional comment this one replies to.
    pub reply_to: Option<i32>,
}

/// A comment with its author card for listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentEntry {
    pub comment: Comment,
    pub author: UserCard,
}
