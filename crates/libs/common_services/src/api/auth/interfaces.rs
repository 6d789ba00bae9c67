use crate::database::app_user::UserRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Represents the data required to create a new account.
#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: String,
}

/// Represents the data required for login.
#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct LoginUser {
    pub email: String,
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: String,
}

/// Represents the payload for a refresh token request.
#[derive(Deserialize, Debug, ToSchema)]
pub struct RefreshTokenPayload {
    pub refresh_token: String,
}

/// Represents a pair of access and refresh tokens.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct Tokens {
    pub expiry: u64,
    pub access_token: String,
    pub refresh_token: String,
}

/// Represents the claims contained within an access JWT.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct AuthClaims {
    pub sub: i32,
    pub exp: i64,
    pub role: UserRole,
}

/// One-shot account operations carried inside an account token.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccountOperation {
    Confirm,
    ResetPassword,
    ChangeEmail,
}

/// Claims of a confirm/reset/change-email token.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct AccountClaims {
    pub sub: i32,
    pub exp: i64,
    pub operation: AccountOperation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_email: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct TokenPayload {
    pub token: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ForgotPasswordPayload {
    pub email: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ResetPasswordPayload {
    pub token: String,
    #[schema(value_type = String, format = "password")]
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ChangePasswordPayload {
    #[schema(value_type = String, format = "password")]
    pub old_password: String,
    #[schema(value_type = String, format = "password")]
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ChangeEmailPayload {
    pub email: String,
}
