use crate::api::pagination::Page;
use crate::api::search::error::SearchError;
use crate::api::search::interfaces::{SearchCategory, SearchResults};
use crate::api::users::interfaces::UserCard;
use crate::database::photo_store::PhotoStore;
use crate::database::tag_store::TagStore;
use crate::database::user_store::UserStore;
use crate::page_offset;
use sqlx::PgPool;

/// Keyword search over photos, users or tags. The match is a plain
/// substring filter; a dedicated index stays outside this system.
pub async fn search(
    pool: &PgPool,
    query: &str,
    category: SearchCategory,
    per_page: i64,
    page: i64,
) -> Result<SearchResults, SearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    let offset = page_offset(page, per_page);

    let results = match category {
        SearchCategory::Photo => {
            let items = PhotoStore::search_page(pool, query, per_page, offset).await?;
            let total = PhotoStore::search_count(pool, query).await?;
            SearchResults::Photo(Page::new(items, page, per_page, total))
        }
        SearchCategory::User => {
            let users = UserStore::search_page(pool, query, per_page, offset).await?;
            let total = UserStore::search_count(pool, query).await?;
            let items = users.iter().map(UserCard::from).collect();
            SearchResults::User(Page::new(items, page, per_page, total))
        }
        SearchCategory::Tag => {
            let items = TagStore::search_page(pool, query, per_page, offset).await?;
            let total = TagStore::search_count(pool, query).await?;
            SearchResults::Tag(Page::new(items, page, per_page, total))
        }
    };
    Ok(results)
}
