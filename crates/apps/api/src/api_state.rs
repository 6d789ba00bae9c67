use app_state::{AppSettings, PageSizeSettings, UploadSettings};
use axum::extract::FromRef;
use sqlx::PgPool;

#[derive(Clone)]
pub struct ApiContext {
    pub pool: PgPool,
    pub settings: AppSettings,
}

// These impls let Axum extract the pieces of the state that middleware
// and extractors need.
impl FromRef<ApiContext> for PgPool {
    fn from_ref(state: &ApiContext) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}

impl FromRef<ApiContext> for UploadSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.uploads.clone()
    }
}

impl FromRef<ApiContext> for PageSizeSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.pagination
    }
}
