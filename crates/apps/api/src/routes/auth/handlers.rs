use crate::api_state::ApiContext;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::interfaces::{
    ChangeEmailPayload, ChangePasswordPayload, ForgotPasswordPayload, LoginUser,
    RefreshTokenPayload, RegisterUser, ResetPasswordPayload, TokenPayload, Tokens,
};
use common_services::api::auth::service;
use common_services::api::social::interfaces::MessageResponse;
use common_services::database::app_user::User;

/// Register a new account. The first confirmation email lands on the
/// outbox; the account stays unconfirmed until the token comes back.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterUser,
    responses(
        (status = 200, description = "Account created.", body = User),
        (status = 400, description = "Invalid username or password."),
        (status = 409, description = "Username or email already in use."),
    )
)]
pub async fn register(
    State(context): State<ApiContext>,
    Json(payload): Json<RegisterUser>,
) -> Result<Json<User>, AuthError> {
    let user = service::register(&context.pool, &context.settings, &payload).await?;
    Ok(Json(user))
}

/// Log in with email and password.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Token pair.", body = Tokens),
        (status = 401, description = "Invalid credentials."),
        (status = 403, description = "Account blocked."),
    )
)]
pub async fn login(
    State(context): State<ApiContext>,
    Json(payload): Json<LoginUser>,
) -> Result<Json<Tokens>, AuthError> {
    let user =
        service::authenticate_user(&context.pool, &payload.email, &payload.password).await?;
    let tokens = service::issue_tokens(
        &context.pool,
        &context.settings.secrets.jwt,
        user.id,
        user.role,
    )
    .await?;
    Ok(Json(tokens))
}

/// Rotate a refresh token into a fresh token pair.
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "Auth",
    request_body = RefreshTokenPayload,
    responses(
        (status = 200, description = "New token pair.", body = Tokens),
        (status = 401, description = "Unknown, expired or reused token."),
    )
)]
pub async fn refresh_session(
    State(context): State<ApiContext>,
    Json(payload): Json<RefreshTokenPayload>,
) -> Result<Json<Tokens>, AuthError> {
    let tokens = service::refresh_tokens(
        &context.pool,
        &context.settings.secrets.jwt,
        &payload.refresh_token,
    )
    .await?;
    Ok(Json(tokens))
}

pub async fn logout(
    State(context): State<ApiContext>,
    Json(payload): Json<RefreshTokenPayload>,
) -> Result<StatusCode, AuthError> {
    service::logout_user(&context.pool, &payload.refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The authenticated user's own record.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "The current user.", body = User),
        (status = 401, description = "Not authenticated."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_me(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}

pub async fn confirm_account(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<TokenPayload>,
) -> Result<Json<MessageResponse>, AuthError> {
    service::confirm_account(
        &context.pool,
        &context.settings.secrets.jwt,
        &user,
        &payload.token,
    )
    .await?;
    Ok(Json(MessageResponse::new("Account confirmed.")))
}

pub async fn resend_confirm_email(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<MessageResponse>, AuthError> {
    service::resend_confirm_email(&context.pool, &context.settings, &user).await?;
    Ok(Json(MessageResponse::new(
        "Confirmation email sent, check your inbox.",
    )))
}

pub async fn forgot_password(
    State(context): State<ApiContext>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<Json<MessageResponse>, AuthError> {
    service::forgot_password(&context.pool, &context.settings, &payload.email).await?;
    Ok(Json(MessageResponse::new(
        "If the email is registered, a reset link is on its way.",
    )))
}

pub async fn reset_password(
    State(context): State<ApiContext>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<Json<MessageResponse>, AuthError> {
    service::reset_password(
        &context.pool,
        &context.settings.secrets.jwt,
        &payload.token,
        &payload.password,
    )
    .await?;
    Ok(Json(MessageResponse::new("Password updated.")))
}

pub async fn change_password(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<Json<MessageResponse>, AuthError> {
    service::change_password(&context.pool, user.id, &payload).await?;
    Ok(Json(MessageResponse::new("Password updated.")))
}

pub async fn change_email_request(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<ChangeEmailPayload>,
) -> Result<Json<MessageResponse>, AuthError> {
    service::change_email_request(&context.pool, &context.settings, &user, &payload.email).await?;
    Ok(Json(MessageResponse::new(
        "Confirmation email sent, check your inbox.",
    )))
}

pub async fn confirm_change_email(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<TokenPayload>,
) -> Result<Json<MessageResponse>, AuthError> {
    service::confirm_change_email(
        &context.pool,
        &context.settings.secrets.jwt,
        &user,
        &payload.token,
    )
    .await?;
    Ok(Json(MessageResponse::new("Email updated.")))
}
