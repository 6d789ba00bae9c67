use axum::body::Body;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use common_services::api::auth::error::AuthError;
use common_services::database::app_user::{Permission, User};
use http::Request;

/// Route-group layer rejecting users whose role lacks the permission.
/// Expects `ApiUser` to have run first and stored the user.
pub async fn require_permission(
    State(required): State<Permission>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = req
        .extensions()
        .get::<User>()
        .ok_or(AuthError::UserNotFound)?;

    if !user.can(required) {
        return Err(AuthError::PermissionDenied {
            username: user.username.clone(),
            action: req.uri().to_string(),
        });
    }

    Ok(next.run(req).await)
}
