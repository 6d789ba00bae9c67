use crate::api_state::ApiContext;
use crate::routes::auth::middlewares::common::{decode_token, extract_context, extract_token};
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use common_services::api::auth::error::AuthError;
use common_services::database::app_user::User;
use common_services::database::user_store::UserStore;

/// Like `ApiUser`, but anonymous requests pass through with `None`
/// instead of being rejected.
#[derive(Clone, Debug)]
pub struct OptionalUser(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(token) = extract_token(parts) else {
            return Ok(Self(None));
        };
        let context = extract_context(parts, state).await?;
        let Ok(claims) = decode_token(&token, &context.settings.secrets.jwt) else {
            return Ok(Self(None));
        };
        let user = UserStore::find_by_id(&context.pool, claims.sub).await?;
        Ok(Self(user))
    }
}
