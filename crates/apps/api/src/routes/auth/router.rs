use crate::api_state::ApiContext;
use crate::routes::auth::handlers::{
    change_email_request, change_password, confirm_account, confirm_change_email, forgot_password,
    get_me, login, logout, refresh_session, register, resend_confirm_email, reset_password,
};
use app_state::RateLimitingSettings;
use axum::routing::{get, post};
use axum::Router;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tracing::info;

pub fn auth_public_router(rate_limiting: &RateLimitingSettings) -> Router<ApiContext> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(rate_limiting.req_per_second)
        .burst_size(rate_limiting.burst_size)
        .finish()
        .expect("Could not create rate-limiting governor.");

    info!(
        "Auth rate limits: {} req/s, burst {}",
        rate_limiting.req_per_second, rate_limiting.burst_size
    );

    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh_session))
        .route("/auth/logout", post(logout))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
        .layer(GovernorLayer::new(governor_conf))
}

pub fn auth_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/auth/me", get(get_me))
        .route("/auth/confirm", post(confirm_account))
        .route("/auth/confirm/resend", post(resend_confirm_email))
        .route("/auth/change-password", post(change_password))
        .route("/auth/change-email", post(change_email_request))
        .route("/auth/change-email/confirm", post(confirm_change_email))
}
