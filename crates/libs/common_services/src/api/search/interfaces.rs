use crate::api::pagination::Page;
use crate::api::users::interfaces::UserCard;
use crate::database::photo::Photo;
use crate::database::tag::Tag;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchCategory {
    #[default]
    Photo,
    User,
    Tag,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Search keywords.
    pub q: String,
    /// Defaults to photos.
    pub category: Option<SearchCategory>,
    pub page: Option<i64>,
}

/// Search results, shaped by the requested category.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum SearchResults {
    Photo(Page<Photo>),
    User(Page<UserCard>),
    Tag(Page<Tag>),
}
