use crate::api::users::interfaces::UserCard;
use crate::database::photo::{Photo, PhotoTagOrder};
use crate::database::tag::Tag;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// A photo with the context its detail page needs.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct PhotoDetail {
    pub photo: Photo,
    pub author: UserCard,
    pub tags: Vec<Tag>,
    pub comments_count: i64,
    pub collectors_count: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DescriptionPayload {
    pub description: Option<String>,
}

/// Whitespace-separated tag names to attach to a photo.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TagsPayload {
    pub tags: String,
}

/// Query for photos within a tag: page plus the ordering switch.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TagPhotosQuery {
    pub page: Option<i64>,
    pub order: Option<PhotoTagOrder>,
}
