use crate::database::DbError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationsError {
    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Notification not found: {0}")]
    NotFound(i32),

    #[error("Permission denied.")]
    AccessDenied,
}

impl IntoResponse for NotificationsError {
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
            Self::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Notification not found: {id}"),
            ),
            Self::AccessDenied => (StatusCode::FORBIDDEN, self.to_string()),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for NotificationsError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
