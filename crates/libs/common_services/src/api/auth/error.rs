use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use color_eyre::eyre;
use serde_json::json;
use tracing::{info, warn};

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    InvalidCredentials,
    AccountBlocked,
    AccountNotConfirmed,
    RefreshTokenExpiredOrNotFound,
    UserNotFound,
    UsernameTaken,
    EmailTaken,
    InvalidUsername,
    WeakPassword,
    PermissionDenied { username: String, action: String },
    Internal(eyre::Report),
}

// Log failures before they are flattened into a generic response body.
fn log_auth_failure(error: &AuthError) {
    match error {
        AuthError::MissingToken => warn!("Authentication failed: Missing Authorization token."),
        AuthError::InvalidToken => warn!("Authentication failed: Invalid token provided."),
        AuthError::InvalidCredentials => {
            info!("Authentication failed: Invalid credentials provided.");
        }
        AuthError::AccountBlocked => info!("Authentication refused: Account is blocked."),
        AuthError::AccountNotConfirmed => {
            info!("Request refused: Account has not been confirmed.");
        }
        AuthError::RefreshTokenExpiredOrNotFound => info!("Refresh token not found or expired."),
        AuthError::UserNotFound => warn!("Authentication failed: User from token not found."),
        AuthError::UsernameTaken | AuthError::EmailTaken => {
            info!("Registration failed: Username or email already in use.");
        }
        AuthError::InvalidUsername => info!("Validation failed: Illegal username."),
        AuthError::WeakPassword => info!("Validation failed: Password too short."),
        AuthError::PermissionDenied { username, action } => {
            warn!("Authorization failed: User {username} attempted: {action}");
        }
        AuthError::Internal(e) => {
            tracing::error!("Internal server error during authentication: {:?}", e);
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        log_auth_failure(&self);

        let (status, error_message) = match self {
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::UserNotFound
            | AuthError::RefreshTokenExpiredOrNotFound => {
                (StatusCode::UNAUTHORIZED, "Authentication failed")
            }
            AuthError::AccountBlocked => (StatusCode::FORBIDDEN, "This account has been blocked"),
            AuthError::AccountNotConfirmed => (
                StatusCode::FORBIDDEN,
                "Please confirm your account first",
            ),
            AuthError::UsernameTaken => {
                (StatusCode::CONFLICT, "This username is already in use")
            }
            AuthError::EmailTaken => (StatusCode::CONFLICT, "This email is already in use"),
            AuthError::InvalidUsername => (
                StatusCode::BAD_REQUEST,
                "The username should contain only a-z, A-Z and 0-9 (1-20 characters)",
            ),
            AuthError::WeakPassword => (
                StatusCode::BAD_REQUEST,
                "The password must be at least 8 characters long",
            ),
            AuthError::PermissionDenied { .. } => (StatusCode::FORBIDDEN, "Permission denied"),
            AuthError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred",
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

// Allows `?` to convert `sqlx::Error`, `DbError` and friends into
// `AuthError::Internal`.
impl<E> From<E> for AuthError
where
    E: Into<eyre::Report>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
