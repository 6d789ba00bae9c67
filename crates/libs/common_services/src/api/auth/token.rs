use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use crate::api::auth::interfaces::{AccountClaims, AccountOperation};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::{rng, RngCore};

/// Represents the components of a refresh token for secure storage and
/// verification.
pub struct RefreshTokenParts {
    pub raw_token: String,
    pub selector: String,
    pub verifier_hash: String,
}

/// Generates a new set of refresh token parts: a raw token, a selector,
/// and a verifier hash.
///
/// # Errors
///
/// * `AuthError::Internal` if password hashing fails.
pub fn generate_refresh_token_parts() -> Result<RefreshTokenParts, AuthError> {
    let mut raw_bytes = [0u8; 32];
    rng().fill_bytes(&mut raw_bytes);

    let selector_bytes = &raw_bytes[..16];
    let verifier_bytes = &raw_bytes[16..];

    let selector = URL_SAFE_NO_PAD.encode(selector_bytes);
    let raw_token = URL_SAFE_NO_PAD.encode(raw_bytes);
    let verifier_hash = hash_password(verifier_bytes)?;

    Ok(RefreshTokenParts {
        raw_token,
        selector,
        verifier_hash,
    })
}

/// Splits a raw refresh token string into its selector and verifier bytes.
///
/// # Errors
///
/// * `AuthError::InvalidToken` if the token is not valid base64 or has an
///   incorrect length.
pub fn split_refresh_token(token: &str) -> Result<(String, Vec<u8>), AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| AuthError::InvalidToken)?;

    if bytes.len() != 32 {
        return Err(AuthError::InvalidToken);
    }

    let selector = URL_SAFE_NO_PAD.encode(&bytes[..16]);
    Ok((selector, bytes[16..].to_vec()))
}

/// Verifies a token's verifier bytes against a stored verifier hash.
pub fn verify_token(verifier_bytes: &[u8], verifier_hash: &str) -> Result<bool, AuthError> {
    Ok(verify_password(verifier_bytes, verifier_hash)?)
}

/// Issues a one-shot account token (confirm account, reset password,
/// change email) with an operation claim.
pub fn issue_account_token(
    jwt_secret: &str,
    user_id: i32,
    operation: AccountOperation,
    new_email: Option<String>,
    expiry_hours: i64,
) -> Result<String, AuthError> {
    let exp = (Utc::now() + Duration::hours(expiry_hours)).timestamp();
    let claims = AccountClaims {
        sub: user_id,
        exp,
        operation,
        new_email,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .map_err(Into::into)
}

/// Decodes an account token and checks it carries the expected operation.
///
/// # Errors
///
/// * `AuthError::InvalidToken` when the token is malformed, expired, or
///   was issued for a different operation.
pub fn decode_account_token(
    jwt_secret: &str,
    token: &str,
    expected: AccountOperation,
) -> Result<AccountClaims, AuthError> {
    let claims = decode::<AccountClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)?;

    if claims.operation != expected {
        return Err(AuthError::InvalidToken);
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_token_splits_back_to_its_selector() {
        let parts = generate_refresh_token_parts().unwrap();
        let (selector, verifier_bytes) = split_refresh_token(&parts.raw_token).unwrap();
        assert_eq!(selector, parts.selector);
        assert!(verify_token(&verifier_bytes, &parts.verifier_hash).unwrap());
    }

    #[test]
    fn malformed_refresh_token_is_rejected() {
        assert!(split_refresh_token("not-base64!!").is_err());
        assert!(split_refresh_token(&URL_SAFE_NO_PAD.encode([0u8; 8])).is_err());
    }

    #[test]
    fn account_token_round_trip_checks_operation() {
        let token = issue_account_token("secret", 42, AccountOperation::Confirm, None, 1).unwrap();

        let claims = decode_account_token("secret", &token, AccountOperation::Confirm).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.operation, AccountOperation::Confirm);

        // The same token must not validate for another operation.
        assert!(decode_account_token("secret", &token, AccountOperation::ResetPassword).is_err());
        // Nor with a different secret.
        assert!(decode_account_token("other", &token, AccountOperation::Confirm).is_err());
    }

    #[test]
    fn change_email_token_carries_the_new_address() {
        let token = issue_account_token(
            "secret",
            7,
            AccountOperation::ChangeEmail,
            Some("new@example.com".into()),
            1,
        )
        .unwrap();
        let claims = decode_account_token("secret", &token, AccountOperation::ChangeEmail).unwrap();
        assert_eq!(claims.new_email.as_deref(), Some("new@example.com"));
    }
}
