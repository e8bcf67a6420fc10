//! Report status, priority, and reporter-type constants plus validation.
//!
//! Defines the report lifecycle values and the field-level checks used by
//! both the public submission endpoint and the officer mutation gateway.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a newly submitted report.
pub const STATUS_OPEN: &str = "open";
/// An officer is actively working the report.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// The report has been resolved or rejected; `closed_at` is stamped.
pub const STATUS_CLOSED: &str = "closed";

/// All valid report statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_OPEN, STATUS_IN_PROGRESS, STATUS_CLOSED];

// ---------------------------------------------------------------------------
// Priority constants
// ---------------------------------------------------------------------------

pub const PRIORITY_LOW: &str = "low";
/// Default priority assigned at submission.
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";

/// All valid report priorities.
pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH];

// ---------------------------------------------------------------------------
// Reporter types
// ---------------------------------------------------------------------------

pub const REPORTER_STUDENT: &str = "student";
pub const REPORTER_PARENT: &str = "parent";
pub const REPORTER_OTHER: &str = "other";

/// All valid reporter types for public submissions.
pub const VALID_REPORTER_TYPES: &[&str] = &[REPORTER_STUDENT, REPORTER_PARENT, REPORTER_OTHER];

// ---------------------------------------------------------------------------
// Field limits
// ---------------------------------------------------------------------------

/// Maximum length for the free-text description field (characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

/// Maximum length for short text fields (teacher name, subject, grade).
pub const MAX_SHORT_FIELD_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid report status '{}'. Must be one of: {:?}",
            status, VALID_STATUSES
        )))
    }
}

/// Validate that a priority string is one of the known priorities.
pub fn validate_priority(priority: &str) -> Result<(), CoreError> {
    if VALID_PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid report priority '{}'. Must be one of: {:?}",
            priority, VALID_PRIORITIES
        )))
    }
}

/// Validate that a reporter type is one of the known types.
pub fn validate_reporter_type(reporter_type: &str) -> Result<(), CoreError> {
    if VALID_REPORTER_TYPES.contains(&reporter_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid reporter type '{}'. Must be one of: {:?}",
            reporter_type, VALID_REPORTER_TYPES
        )))
    }
}

/// Validate a required short text field (non-empty after trimming, bounded).
pub fn validate_short_field(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("Missing field: {field}")));
    }
    if trimmed.len() > MAX_SHORT_FIELD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Field {field} exceeds maximum length of {MAX_SHORT_FIELD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the free-text description (non-empty after trimming, bounded).
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Missing field: description".into()));
    }
    if trimmed.len() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters (got {})",
            trimmed.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
