use crate::api_state::ApiContext;
use crate::routes::auth::middlewares::common::{decode_token, extract_context, extract_token};
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use common_services::api::auth::error::AuthError;
use common_services::database::app_user::User;
use common_services::database::user_store::UserStore;

/// Extracts the authenticated user from the bearer token and stores it
/// in the request extensions for the handlers behind the layer.
#[derive(Clone, Debug)]
pub struct ApiUser(pub User);

impl<S> FromRequestParts<S> for ApiUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let context = extract_context(parts, state).await?;
        let claims = decode_token(&token, &context.settings.secrets.jwt)?;
        let user = UserStore::find_by_id(&context.pool, claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if !user.active {
            return Err(AuthError::AccountBlocked);
        }
        parts.extensions.insert(user.clone());
        Ok(Self(user))
    }
}
