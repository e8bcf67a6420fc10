//! Report entity model and DTOs.

use edualert_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full report row from the `reports` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Report {
    pub id: DbId,
    pub reference_number: String,
    pub school_id: DbId,
    pub grade: String,
    pub teacher_name: String,
    pub subject: String,
    pub reporter_type: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Report joined with school/region/level names for listing and detail.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReportWithSchool {
    pub id: DbId,
    pub reference_number: String,
    pub school_id: DbId,
    pub school_name: String,
    pub region_id: DbId,
    pub region_name: String,
    pub school_level_id: DbId,
    pub school_level_name: String,
    pub grade: String,
    pub teacher_name: String,
    pub subject: String,
    pub reporter_type: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the public submission endpoint.
#[derive(Debug, Deserialize)]
pub struct CreateReport {
    pub school_id: DbId,
    pub grade: String,
    pub teacher_name: String,
    pub subject: String,
    pub reporter_type: String,
    pub description: String,
}

/// Partial update applied by the mutation gateway. Omitted fields are
/// untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateReport {
    pub status: Option<String>,
    pub priority: Option<String>,
    /// Full-replace assignment list; `None` leaves assignments alone.
    pub assigned_officer_ids: Option<Vec<DbId>>,
}

/// Query filters for the report listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ReportListParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Aggregate counts for the dashboard, grouped by status and priority.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReportStats {
    pub total: i64,
    pub open: i64,
    pub in_progress: i64,
    pub closed: i64,
    pub low: i64,
    pub medium: i64,
    pub high: i64,
}
