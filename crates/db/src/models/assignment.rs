//! Assignment entity model.

use edualert_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Assignment row binding an officer to a report.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Assignment {
    pub id: DbId,
    pub report_id: DbId,
    pub officer_id: DbId,
    pub assigned_by: DbId,
    pub assigned_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_at: Option<Timestamp>,
}

/// Assignment joined with the officer's name for report detail responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AssignmentWithOfficer {
    pub id: DbId,
    pub report_id: DbId,
    pub officer_id: DbId,
    pub officer_name: String,
    pub assigned_by: DbId,
    pub assigned_at: Timestamp,
}
