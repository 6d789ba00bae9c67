use crate::database::DbError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotosError {
    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Photo not found: {0}")]
    PhotoNotFound(i32),

    #[error("Tag not found: {0}")]
    TagNotFound(i32),

    #[error("Permission denied.")]
    PermissionDenied,

    #[error("Please confirm your account first.")]
    NotConfirmed,

    #[error("The uploaded file is not an accepted image.")]
    InvalidImage,

    #[error("{0}")]
    Validation(String),
}

impl IntoResponse for PhotosError {
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
            Self::PhotoNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Photo not found: {id}"))
            }
            Self::TagNotFound(id) => (StatusCode::NOT_FOUND, format!("Tag not found: {id}")),
            Self::PermissionDenied => (StatusCode::FORBIDDEN, self.to_string()),
            Self::NotConfirmed => (StatusCode::FORBIDDEN, self.to_string()),
            Self::InvalidImage => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<tokio::task::JoinError> for PhotosError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(eyre::Report::new(err))
    }
}

impl From<DbError> for PhotosError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
