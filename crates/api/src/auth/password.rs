//! Argon2id password hashing, verification, and strength validation.
//!
//! All password hashes use the Argon2id variant with a cryptographically
//! random salt generated via [`OsRng`]. The PHC string format is used for
//! storage so that algorithm parameters and salt are embedded in the hash
//! itself.
//!
//! Two policies exist: registration and reset enforce the full character
//! class rules; the profile-update flow enforces the minimum length only.
//! The asymmetry mirrors the product as shipped -- do not unify without
//! product sign-off.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use edualert_core::error::CoreError;

/// Minimum password length for every flow.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Strict policy used by registration and password reset: minimum length
/// plus uppercase, lowercase, digit, and symbol character classes.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    validate_password_length(password)?;

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(CoreError::Validation(
            "Password must contain an uppercase letter".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(CoreError::Validation(
            "Password must contain a lowercase letter".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation("Password must contain a digit".into()));
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        return Err(CoreError::Validation(
            "Password must contain a symbol".into(),
        ));
    }
    Ok(())
}

/// Looser policy used by profile update: minimum length only.
pub fn validate_password_length(password: &str) -> Result<(), CoreError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");

        // The hash must be a valid PHC string starting with the argon2id identifier.
        assert!(
            hash.starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );

        let verified = verify_password(password, &hash).expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        let verified = verify_password("wrong-password", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[test]
    fn test_unusable_hash_errors() {
        // The seeded system user stores "!" -- not a PHC string.
        assert!(verify_password("anything", "!").is_err());
    }

    #[test]
    fn strict_policy_requires_all_classes() {
        assert!(validate_password_strength("Aa1!aaaa").is_ok());
        assert!(validate_password_strength("aa1!aaaa").is_err(), "no uppercase");
        assert!(validate_password_strength("AA1!AAAA").is_err(), "no lowercase");
        assert!(validate_password_strength("Aa!aaaaa").is_err(), "no digit");
        assert!(validate_password_strength("Aa1aaaaa").is_err(), "no symbol");
        assert!(validate_password_strength("Aa1!").is_err(), "too short");
    }

    #[test]
    fn basic_policy_checks_length_only() {
        // The profile-update policy accepts what the strict policy rejects.
        assert!(validate_password_length("aaaaaaaa").is_ok());
        assert!(validate_password_length("short").is_err());
    }
}
