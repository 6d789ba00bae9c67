use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use crate::api::auth::interfaces::{
    AccountOperation, ChangePasswordPayload, RegisterUser, Tokens,
};
use crate::api::auth::token::{
    decode_account_token, generate_refresh_token_parts, issue_account_token, split_refresh_token,
    verify_token, RefreshTokenParts,
};
use crate::database::app_user::{User, UserRole, UserWithPassword};
use crate::database::user_store::UserStore;
use crate::outbox::{send_change_email_email, send_confirm_email, send_reset_password_email};
use app_state::{constants, AppSettings};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::{Executor, PgPool, Postgres};
use tracing::info;

pub fn validate_username(username: &str) -> Result<(), AuthError> {
    let ok = (1..=20).contains(&username.len())
        && username.chars().all(|c| c.is_ascii_alphanumeric());
    if ok {
        Ok(())
    } else {
        Err(AuthError::InvalidUsername)
    }
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if (8..=128).contains(&password.len()) {
        Ok(())
    } else {
        Err(AuthError::WeakPassword)
    }
}

/// Creates a new account. The account starts unconfirmed; a confirmation
/// email is placed on the outbox. Registering with the configured admin
/// email yields the Administrator role.
///
/// # Errors
///
/// * `AuthError::InvalidUsername` / `AuthError::WeakPassword` on validation.
/// * `AuthError::UsernameTaken` / `AuthError::EmailTaken` on duplicates.
pub async fn register(
    pool: &PgPool,
    settings: &AppSettings,
    payload: &RegisterUser,
) -> Result<User, AuthError> {
    validate_username(&payload.username)?;
    validate_password(&payload.password)?;

    if UserStore::username_exists(pool, &payload.username).await? {
        return Err(AuthError::UsernameTaken);
    }
    if UserStore::email_exists(pool, &payload.email).await? {
        return Err(AuthError::EmailTaken);
    }

    let role = if payload.email == settings.mail.admin_email {
        UserRole::Administrator
    } else {
        UserRole::User
    };
    let hashed = hash_password(payload.password.as_bytes())?;
    info!(
        "Creating user username={}, email={}",
        payload.username, payload.email
    );
    let user = match UserStore::create(pool, &payload.username, &payload.email, &hashed, role).await
    {
        Ok(user) => user,
        Err(e) if e.is_unique_violation() => return Err(AuthError::UsernameTaken),
        Err(e) => return Err(e.into()),
    };

    let token = issue_account_token(
        &settings.secrets.jwt,
        user.id,
        AccountOperation::Confirm,
        None,
        constants().auth.account_token_expiry_hours,
    )?;
    send_confirm_email(
        pool,
        &settings.mail,
        &settings.api.public_url,
        &user.email,
        &user.username,
        &token,
    )
    .await?;

    Ok(user)
}

/// Authenticates a user based on email and password.
///
/// # Errors
///
/// * `AuthError::InvalidCredentials` if the email or password is incorrect.
/// * `AuthError::AccountBlocked` if the account has been deactivated.
pub async fn authenticate_user(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<UserWithPassword, AuthError> {
    let user = UserStore::find_by_email_with_password(pool, email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = verify_password(password.as_bytes(), &user.password_hash)?;
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }
    if !user.active {
        return Err(AuthError::AccountBlocked);
    }

    Ok(user)
}

/// Issues a fresh access/refresh token pair for a user.
pub async fn issue_tokens(
    pool: &PgPool,
    jwt_secret: &str,
    user_id: i32,
    role: UserRole,
) -> Result<Tokens, AuthError> {
    let parts = generate_refresh_token_parts()?;
    store_refresh_token(pool, user_id, &parts).await?;
    let (access_token, expiry) = create_access_token(jwt_secret, user_id, role)?;
    Ok(Tokens {
        expiry,
        access_token,
        refresh_token: parts.raw_token,
    })
}

/// Stores a refresh token in the database.
pub async fn store_refresh_token<'c, E>(
    executor: E,
    user_id: i32,
    parts: &RefreshTokenParts,
) -> Result<(), AuthError>
where
    E: Executor<'c, Database = Postgres>,
{
    let exp = Utc::now() + Duration::days(constants().auth.refresh_token_expiry_days);
    sqlx::query(
        "INSERT INTO refresh_token (user_id, selector, verifier_hash, expires_at)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(&parts.selector)
    .bind(&parts.verifier_hash)
    .bind(exp)
    .execute(executor)
    .await?;
    Ok(())
}

/// Creates a new access token for a given user ID and role.
pub fn create_access_token(
    jwt_secret: &str,
    user_id: i32,
    role: UserRole,
) -> Result<(String, u64), AuthError> {
    let exp =
        (Utc::now() + Duration::minutes(constants().auth.access_token_expiry_minutes)).timestamp();
    let claims = crate::api::auth::interfaces::AuthClaims {
        sub: user_id,
        role,
        exp,
    };
    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .map_err(Into::<AuthError>::into)?;

    Ok((access_token, exp as u64))
}

/// Handles refresh token rotation, invalidating the old token and issuing
/// a new pair.
///
/// # Errors
///
/// * `AuthError::InvalidToken` if the provided refresh token is malformed.
/// * `AuthError::RefreshTokenExpiredOrNotFound` if it is unknown or expired.
/// * `AuthError::UserNotFound` if its user no longer exists.
pub async fn refresh_tokens(
    pool: &PgPool,
    jwt_secret: &str,
    raw_token: &str,
) -> Result<Tokens, AuthError> {
    let (selector, verifier_bytes) = split_refresh_token(raw_token)?;
    let record = sqlx::query_as::<_, (i32, String)>(
        "SELECT user_id, verifier_hash FROM refresh_token
         WHERE selector = $1 AND expires_at > NOW()",
    )
    .bind(&selector)
    .fetch_optional(pool)
    .await
    .map_err(Into::<AuthError>::into)?
    .ok_or(AuthError::RefreshTokenExpiredOrNotFound)?;
    let (user_id, verifier_hash) = record;

    if !verify_token(&verifier_bytes, &verifier_hash)? {
        // Wrong verifier for a known selector: assume token theft and
        // revoke every refresh token of that user.
        sqlx::query("DELETE FROM refresh_token WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await
            .ok();
        return Err(AuthError::InvalidToken);
    }

    let user = UserStore::find_by_id(pool, user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    let mut tx = pool.begin().await.map_err(Into::<AuthError>::into)?;
    sqlx::query("DELETE FROM refresh_token WHERE selector = $1")
        .bind(&selector)
        .execute(&mut *tx)
        .await
        .map_err(Into::<AuthError>::into)?;

    let new_parts = generate_refresh_token_parts()?;
    store_refresh_token(&mut *tx, user_id, &new_parts).await?;

    tx.commit().await.map_err(Into::<AuthError>::into)?;

    let (access_token, expiry) = create_access_token(jwt_secret, user_id, user.role)?;
    Ok(Tokens {
        expiry,
        access_token,
        refresh_token: new_parts.raw_token,
    })
}

/// Deletes the refresh token matching the provided one, effectively
/// logging out the user. Always appears successful to prevent token
/// enumeration.
pub async fn logout_user(pool: &PgPool, raw_token: &str) -> Result<(), AuthError> {
    if let Ok((selector, verifier_bytes)) = split_refresh_token(raw_token) {
        let record = sqlx::query_as::<_, (String,)>(
            "SELECT verifier_hash FROM refresh_token WHERE selector = $1",
        )
        .bind(&selector)
        .fetch_optional(pool)
        .await
        .map_err(Into::<AuthError>::into)?;
        if let Some((verifier_hash,)) = record {
            if verify_token(&verifier_bytes, &verifier_hash).unwrap_or(false) {
                sqlx::query("DELETE FROM refresh_token WHERE selector = $1")
                    .bind(&selector)
                    .execute(pool)
                    .await
                    .map_err(Into::<AuthError>::into)?;
            }
        }
    }
    Ok(())
}

//================================================================================
// Account operations (confirm / reset / change email)
//================================================================================

/// Confirms the account of the logged-in user with a confirm token.
pub async fn confirm_account(
    pool: &PgPool,
    jwt_secret: &str,
    user: &User,
    token: &str,
) -> Result<(), AuthError> {
    let claims = decode_account_token(jwt_secret, token, AccountOperation::Confirm)?;
    if claims.sub != user.id {
        return Err(AuthError::InvalidToken);
    }
    UserStore::set_confirmed(pool, user.id).await?;
    info!("User {} confirmed their account.", user.username);
    Ok(())
}

/// Re-issues the confirmation email for an unconfirmed account.
pub async fn resend_confirm_email(
    pool: &PgPool,
    settings: &AppSettings,
    user: &User,
) -> Result<(), AuthError> {
    let token = issue_account_token(
        &settings.secrets.jwt,
        user.id,
        AccountOperation::Confirm,
        None,
        constants().auth.account_token_expiry_hours,
    )?;
    send_confirm_email(
        pool,
        &settings.mail,
        &settings.api.public_url,
        &user.email,
        &user.username,
        &token,
    )
    .await?;
    Ok(())
}

/// Enqueues a password-reset email when the address is known. Succeeds
/// either way so the endpoint does not leak which emails exist.
pub async fn forgot_password(
    pool: &PgPool,
    settings: &AppSettings,
    email: &str,
) -> Result<(), AuthError> {
    let Some(user) = UserStore::find_by_email(pool, email).await? else {
        return Ok(());
    };
    let token = issue_account_token(
        &settings.secrets.jwt,
        user.id,
        AccountOperation::ResetPassword,
        None,
        constants().auth.account_token_expiry_hours,
    )?;
    send_reset_password_email(
        pool,
        &settings.mail,
        &settings.api.public_url,
        &user.email,
        &user.username,
        &token,
    )
    .await?;
    Ok(())
}

/// Sets a new password from a reset token.
pub async fn reset_password(
    pool: &PgPool,
    jwt_secret: &str,
    token: &str,
    new_password: &str,
) -> Result<(), AuthError> {
    let claims = decode_account_token(jwt_secret, token, AccountOperation::ResetPassword)?;
    validate_password(new_password)?;
    let user = UserStore::find_by_id(pool, claims.sub)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    let hashed = hash_password(new_password.as_bytes())?;
    UserStore::update_password(pool, user.id, &hashed).await?;
    Ok(())
}

/// Starts a change-email flow: the confirmation goes to the new address.
pub async fn change_email_request(
    pool: &PgPool,
    settings: &AppSettings,
    user: &User,
    new_email: &str,
) -> Result<(), AuthError> {
    if UserStore::email_exists(pool, new_email).await? {
        return Err(AuthError::EmailTaken);
    }
    let token = issue_account_token(
        &settings.secrets.jwt,
        user.id,
        AccountOperation::ChangeEmail,
        Some(new_email.to_owned()),
        constants().auth.account_token_expiry_hours,
    )?;
    send_change_email_email(
        pool,
        &settings.mail,
        &settings.api.public_url,
        new_email,
        &user.username,
        &token,
    )
    .await?;
    Ok(())
}

/// Completes a change-email flow with the token from the email.
pub async fn confirm_change_email(
    pool: &PgPool,
    jwt_secret: &str,
    user: &User,
    token: &str,
) -> Result<(), AuthError> {
    let claims = decode_account_token(jwt_secret, token, AccountOperation::ChangeEmail)?;
    if claims.sub != user.id {
        return Err(AuthError::InvalidToken);
    }
    let new_email = claims.new_email.ok_or(AuthError::InvalidToken)?;
    if UserStore::email_exists(pool, &new_email).await? {
        return Err(AuthError::EmailTaken);
    }
    UserStore::update_email(pool, user.id, &new_email).await?;
    Ok(())
}

/// Changes the password of a logged-in user after verifying the old one.
pub async fn change_password(
    pool: &PgPool,
    user_id: i32,
    payload: &ChangePasswordPayload,
) -> Result<(), AuthError> {
    let user = UserStore::find_by_id_with_password(pool, user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    if !verify_password(payload.old_password.as_bytes(), &user.password_hash)? {
        return Err(AuthError::InvalidCredentials);
    }
    validate_password(&payload.password)?;
    let hashed = hash_password(payload.password.as_bytes())?;
    UserStore::update_password(pool, user_id, &hashed).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules_follow_the_registration_form() {
        assert!(validate_username("greyli").is_ok());
        assert!(validate_username("User123").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("dash-ed").is_err());
        assert!(validate_username(&"x".repeat(21)).is_err());
        assert!(validate_username(&"x".repeat(20)).is_ok());
    }

    #[test]
    fn password_length_bounds() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password(&"p".repeat(129)).is_err());
    }
}
