use crate::database::DbError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Photo not found: {0}")]
    PhotoNotFound(i32),

    #[error("Permission denied.")]
    PermissionDenied,

    #[error("Please confirm your account first.")]
    NotConfirmed,

    #[error("You cannot follow yourself.")]
    SelfFollow,

    #[error("Already followed.")]
    AlreadyFollowing,

    #[error("Not followed yet.")]
    NotFollowing,

    #[error("Already collected.")]
    AlreadyCollected,

    #[error("Not collected yet.")]
    NotCollected,
}

impl IntoResponse for SocialError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Database(e) => {
                tracing::error!("Database error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred.".to_owned(),
                )
            }
            Self::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected internal error occurred.".to_owned(),
                )
            }
            Self::UserNotFound(username) => {
                (StatusCode::NOT_FOUND, format!("User not found: {username}"))
            }
            Self::PhotoNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Photo not found: {id}"))
            }
            Self::PermissionDenied => (StatusCode::FORBIDDEN, self.to_string()),
            Self::NotConfirmed => (StatusCode::FORBIDDEN, self.to_string()),
            Self::SelfFollow
            | Self::AlreadyFollowing
            | Self::NotFollowing
            | Self::AlreadyCollected
            | Self::NotCollected => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for SocialError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
