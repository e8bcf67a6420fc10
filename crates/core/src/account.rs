//! Account-token purposes and lifetimes.
//!
//! Verification and password-reset links carry an opaque random token; only
//! its SHA-256 hash is stored (see [`crate::hashing`]). Purposes must match
//! the CHECK constraint on `account_tokens.purpose`.

/// Token emailed after registration; marks the account verified when used.
pub const PURPOSE_VERIFY_EMAIL: &str = "verify_email";
/// Token emailed by the forgot-password flow.
pub const PURPOSE_RESET_PASSWORD: &str = "reset_password";

/// All valid account-token purposes.
pub const VALID_PURPOSES: &[&str] = &[PURPOSE_VERIFY_EMAIL, PURPOSE_RESET_PASSWORD];

/// Verification links stay valid for two days.
pub const VERIFY_TOKEN_TTL_HOURS: i64 = 48;

/// Password-reset links stay valid for one hour.
pub const RESET_TOKEN_TTL_MINS: i64 = 60;

/// Check whether a purpose string is one of the known purposes.
pub fn is_valid_purpose(purpose: &str) -> bool {
    VALID_PURPOSES.contains(&purpose)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_purposes_are_valid() {
        for p in VALID_PURPOSES {
            assert!(is_valid_purpose(p));
        }
        assert!(!is_valid_purpose("magic_link"));
    }
}
