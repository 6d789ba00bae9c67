use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// Verify a password against a given hash.
/// # Errors
///
/// * `PasswordHash::new` can return an error if the hash string is invalid.
pub fn verify_password(password: &[u8], hash: &str) -> color_eyre::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)?;
    let verified = Argon2::default()
        .verify_password(password, &parsed_hash)
        .is_ok();
    Ok(verified)
}

/// Hash a password using Argon2.
/// # Errors
///
/// * `Argon2::hash_password` can return an error if the password hashing fails.
pub fn hash_password(password: &[u8]) -> color_eyre::Result<String> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = argon2.hash_password(password, &salt)?.to_string();
    Ok(password_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password(b"correct horse battery staple").unwrap();
        assert!(verify_password(b"correct horse battery staple", &hash).unwrap());
        assert!(!verify_password(b"wrong password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password(b"same password").unwrap();
        let b = hash_password(b"same password").unwrap();
        assert_ne!(a, b);
    }
}
