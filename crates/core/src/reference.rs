//! Human-facing reference number scheme for reports.
//!
//! Reference numbers look like `EDU20260042`: the `EDU` prefix, the
//! four-digit submission year, and a four-digit random suffix. The random
//! suffix is not collision-free on its own; the repository layer enforces a
//! unique constraint and retries generation on conflict.

use rand::Rng;

/// Prefix for all report reference numbers.
pub const REFERENCE_PREFIX: &str = "EDU";

/// Number of random digits appended after the year.
pub const REFERENCE_SUFFIX_DIGITS: usize = 4;

/// Generate a candidate reference number for the given submission year.
pub fn generate_reference_number(year: i32) -> String {
    let suffix: u32 = rand::rng().random_range(0..10_000);
    format!("{REFERENCE_PREFIX}{year}{suffix:04}")
}

/// Check that a string is a well-formed reference number
/// (`EDU` + 4-digit year + 4 digits).
pub fn is_valid_reference_number(reference: &str) -> bool {
    let Some(rest) = reference.strip_prefix(REFERENCE_PREFIX) else {
        return false;
    };
    rest.len() == 4 + REFERENCE_SUFFIX_DIGITS && rest.chars().all(|c| c.is_ascii_digit())
}
