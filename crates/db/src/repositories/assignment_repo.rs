//! Read-side repository for the `assignments` table.
//!
//! The write path (full replace) lives inside
//! [`crate::repositories::ReportRepo::apply_update`] so it shares a
//! transaction with the report-field update.

use edualert_core::types::DbId;
use sqlx::PgPool;

use crate::models::assignment::AssignmentWithOfficer;

/// Provides read operations for report assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Active assignments for a report, with officer names.
    pub async fn list_for_report(
        pool: &PgPool,
        report_id: DbId,
    ) -> Result<Vec<AssignmentWithOfficer>, sqlx::Error> {
        sqlx::query_as::<_, AssignmentWithOfficer>(
            "SELECT a.id, a.report_id, a.officer_id, u.full_name AS officer_name,
                    a.assigned_by, a.assigned_at
             FROM assignments a
             JOIN users u ON u.id = a.officer_id
             WHERE a.report_id = $1 AND a.removed_at IS NULL
             ORDER BY a.assigned_at",
        )
        .bind(report_id)
        .fetch_all(pool)
        .await
    }

    /// Report ids the officer holds an active assignment to.
    pub async fn report_ids_for_officer(
        pool: &PgPool,
        officer_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT report_id FROM assignments
             WHERE officer_id = $1 AND removed_at IS NULL",
        )
        .bind(officer_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
