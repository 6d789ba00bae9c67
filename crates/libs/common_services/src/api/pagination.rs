use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// One page of an offset-paginated listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        Self {
            items,
            page: page.max(1),
            per_page,
            total,
        }
    }
}

/// The `page` query parameter shared by all list endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    /// 1-based page number; defaults to the first page.
    pub page: Option<i64>,
}

impl PageQuery {
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_defaults_and_clamps() {
        assert_eq!(PageQuery { page: None }.page(), 1);
        assert_eq!(PageQuery { page: Some(0) }.page(), 1);
        assert_eq!(PageQuery { page: Some(-3) }.page(), 1);
        assert_eq!(PageQuery { page: Some(7) }.page(), 7);
    }

    #[test]
    fn page_constructor_clamps_page() {
        let page = Page::new(Vec::<i32>::new(), 0, 10, 0);
        assert_eq!(page.page, 1);
    }
}
