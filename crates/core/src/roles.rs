//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in the initial
//! migration.

/// Base role: investigates assigned/subscribed reports only.
pub const ROLE_OFFICER: &str = "officer";
/// Elevated role with unrestricted report visibility.
pub const ROLE_SENIOR_OFFICER: &str = "senior_officer";
/// Full management rights, including user approval.
pub const ROLE_ADMIN: &str = "admin";

/// All valid user roles.
pub const VALID_ROLES: &[&str] = &[ROLE_OFFICER, ROLE_SENIOR_OFFICER, ROLE_ADMIN];

/// Check whether a role string is one of the known roles.
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

/// Whether a role sees every report, with no scope filtering.
///
/// Officers are scoped to their assignments and subscriptions; senior
/// officers and admins see everything.
pub fn has_full_visibility(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_SENIOR_OFFICER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_roles_are_valid() {
        for role in VALID_ROLES {
            assert!(is_valid_role(role), "role '{role}' should be valid");
        }
        assert!(!is_valid_role("superuser"));
        assert!(!is_valid_role(""));
    }

    #[test]
    fn only_elevated_roles_have_full_visibility() {
        assert!(has_full_visibility(ROLE_ADMIN));
        assert!(has_full_visibility(ROLE_SENIOR_OFFICER));
        assert!(!has_full_visibility(ROLE_OFFICER));
    }
}
