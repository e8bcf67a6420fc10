//! Domain-level error taxonomy shared by every layer.
//!
//! The API layer maps these onto HTTP status codes; repositories and domain
//! helpers return them directly so callers never have to invent ad-hoc
//! error strings for common failure classes.

use crate::types::DbId;

/// Domain error for EduAlert operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity type name (e.g. `"Report"`).
        entity: &'static str,
        /// The id that was looked up.
        id: DbId,
    },

    /// A request field failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation violates the entity's current state (e.g. triaging a
    /// report that is no longer open).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Valid credentials but insufficient rights.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Report",
            id: 7,
        };
        assert_eq!(err.to_string(), "Report with id 7 not found");
    }

    #[test]
    fn validation_message_passthrough() {
        let err = CoreError::Validation("description must not be empty".into());
        assert!(err.to_string().contains("description must not be empty"));
    }
}
