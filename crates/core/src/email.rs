//! Email normalization and ministry-domain rules.

use crate::error::CoreError;

/// Officer accounts must use a ministry-issued address.
pub const MINISTRY_EMAIL_DOMAIN: &str = "@moe.gov.gy";

/// Address used for system-authored triage comments; seeded by migration.
pub const SYSTEM_USER_EMAIL: &str = "system@moe.gov.gy";

/// Normalize an email address: trim surrounding whitespace and lowercase.
///
/// All lookups and uniqueness checks operate on the normalized form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether a (normalized) address belongs to the ministry domain.
pub fn is_ministry_email(email: &str) -> bool {
    email.ends_with(MINISTRY_EMAIL_DOMAIN) && email.len() > MINISTRY_EMAIL_DOMAIN.len()
}

/// Validate a ministry email for account creation.
///
/// Returns a [`CoreError::Validation`] naming the requirement; callers on
/// the login path intentionally map any failure to a generic 401 instead.
pub fn validate_ministry_email(email: &str) -> Result<(), CoreError> {
    if !is_ministry_email(email) {
        return Err(CoreError::Validation(format!(
            "Email must be a ministry address ending in {MINISTRY_EMAIL_DOMAIN}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(
            normalize_email("  J.Doe@MOE.gov.GY \n"),
            "j.doe@moe.gov.gy"
        );
    }

    #[test]
    fn ministry_domain_is_enforced() {
        assert!(is_ministry_email("officer@moe.gov.gy"));
        assert!(!is_ministry_email("officer@gmail.com"));
        // Bare domain with no local part is not a valid address.
        assert!(!is_ministry_email("@moe.gov.gy"));
    }

    #[test]
    fn validate_names_the_domain() {
        let err = validate_ministry_email("x@example.com").unwrap_err();
        assert!(err.to_string().contains(MINISTRY_EMAIL_DOMAIN));
    }
}
