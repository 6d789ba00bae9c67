use crate::api_state::ApiContext;
use axum::extract::{Query, State};
use axum::Json;
use common_services::api::search::error::SearchError;
use common_services::api::search::interfaces::{SearchQuery, SearchResults};
use common_services::api::search::service;

/// Keyword search over photos, users or tags.
#[utoipa::path(
    get,
    path = "/search",
    tag = "Search",
    params(SearchQuery),
    responses(
        (status = 200, description = "One page of matches.", body = SearchResults),
        (status = 400, description = "Empty query."),
    )
)]
pub async fn search(
    State(context): State<ApiContext>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>, SearchError> {
    let results = service::search(
        &context.pool,
        &query.q,
        query.category.unwrap_or_default(),
        context.settings.pagination.search_results,
        query.page.unwrap_or(1).max(1),
    )
    .await?;
    Ok(Json(results))
}
