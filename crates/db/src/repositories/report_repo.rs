//! Repository for the `reports` table.
//!
//! Holds the reference-number retry loop, the scope-filtered listing
//! queries, and the transactional mutation gateway (field update plus
//! assignment replace in one transaction).

use chrono::Datelike;
use edualert_core::reference::generate_reference_number;
use edualert_core::report::{STATUS_CLOSED, STATUS_OPEN};
use edualert_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::{
    CreateReport, Report, ReportStats, ReportWithSchool, UpdateReport,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, reference_number, school_id, grade, teacher_name, subject, \
                        reporter_type, description, status, priority, closed_at, \
                        created_at, updated_at";

/// Report columns joined with school/region/level names.
const JOINED_COLUMNS: &str = "rep.id, rep.reference_number, rep.school_id, \
                               sch.name AS school_name, sch.region_id, r.name AS region_name, \
                               sch.school_level_id, l.name AS school_level_name, rep.grade, \
                               rep.teacher_name, rep.subject, rep.reporter_type, rep.description, \
                               rep.status, rep.priority, rep.closed_at, rep.created_at, \
                               rep.updated_at";

/// Join clause matching [`JOINED_COLUMNS`].
const JOIN_CLAUSE: &str = "FROM reports rep
             JOIN schools sch ON sch.id = rep.school_id
             JOIN regions r ON r.id = sch.region_id
             JOIN school_levels l ON l.id = sch.school_level_id";

/// Attempts at generating a unique reference number before giving up.
const MAX_REFERENCE_ATTEMPTS: u32 = 5;

/// Provides CRUD operations and the mutation gateway for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a new report in `open`/`medium` state with a fresh reference
    /// number.
    ///
    /// The random reference suffix is not collision-free; the unique
    /// constraint is the arbiter and generation retries on conflict.
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Report, sqlx::Error> {
        let year = chrono::Utc::now().year();
        let mut last_err = None;

        for attempt in 0..MAX_REFERENCE_ATTEMPTS {
            let reference = generate_reference_number(year);
            match Self::try_insert(pool, &reference, input).await {
                Ok(report) => return Ok(report),
                Err(e) if is_reference_conflict(&e) => {
                    tracing::warn!(attempt, %reference, "Reference number collision, retrying");
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        // Every attempt collided; surface the last unique violation.
        Err(last_err.unwrap_or(sqlx::Error::RowNotFound))
    }

    async fn try_insert(
        pool: &PgPool,
        reference: &str,
        input: &CreateReport,
    ) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports
                (reference_number, school_id, grade, teacher_name, subject,
                 reporter_type, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(reference)
            .bind(input.school_id)
            .bind(input.grade.trim())
            .bind(input.teacher_name.trim())
            .bind(input.subject.trim())
            .bind(&input.reporter_type)
            .bind(input.description.trim())
            .fetch_one(pool)
            .await
    }

    /// Find a report (with school names) by internal id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReportWithSchool>, sqlx::Error> {
        let query = format!("SELECT {JOINED_COLUMNS} {JOIN_CLAUSE} WHERE rep.id = $1");
        sqlx::query_as::<_, ReportWithSchool>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a report (with school names) by its public reference number.
    pub async fn find_by_reference(
        pool: &PgPool,
        reference: &str,
    ) -> Result<Option<ReportWithSchool>, sqlx::Error> {
        let query =
            format!("SELECT {JOINED_COLUMNS} {JOIN_CLAUSE} WHERE rep.reference_number = $1");
        sqlx::query_as::<_, ReportWithSchool>(&query)
            .bind(reference)
            .fetch_optional(pool)
            .await
    }

    /// List reports matching the given filters, newest first.
    ///
    /// `visible_ids` of `None` means no scope restriction; `Some` restricts
    /// to exactly those ids (callers short-circuit the empty set before
    /// reaching this query).
    pub async fn list_filtered(
        pool: &PgPool,
        status: Option<&str>,
        priority: Option<&str>,
        visible_ids: Option<&[DbId]>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReportWithSchool>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {JOIN_CLAUSE}
             WHERE ($1::text IS NULL OR rep.status = $1)
               AND ($2::text IS NULL OR rep.priority = $2)
               AND ($3::bigint[] IS NULL OR rep.id = ANY($3))
             ORDER BY rep.created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, ReportWithSchool>(&query)
            .bind(status)
            .bind(priority)
            .bind(visible_ids)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count reports matching the same filters as [`Self::list_filtered`].
    pub async fn count_filtered(
        pool: &PgPool,
        status: Option<&str>,
        priority: Option<&str>,
        visible_ids: Option<&[DbId]>,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM reports rep
             WHERE ($1::text IS NULL OR rep.status = $1)
               AND ($2::text IS NULL OR rep.priority = $2)
               AND ($3::bigint[] IS NULL OR rep.id = ANY($3))",
        )
        .bind(status)
        .bind(priority)
        .bind(visible_ids)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Aggregate counts by status and priority within the visible scope.
    pub async fn stats(
        pool: &PgPool,
        visible_ids: Option<&[DbId]>,
    ) -> Result<ReportStats, sqlx::Error> {
        sqlx::query_as::<_, ReportStats>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'open') AS open,
                    COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
                    COUNT(*) FILTER (WHERE status = 'closed') AS closed,
                    COUNT(*) FILTER (WHERE priority = 'low') AS low,
                    COUNT(*) FILTER (WHERE priority = 'medium') AS medium,
                    COUNT(*) FILTER (WHERE priority = 'high') AS high
             FROM reports
             WHERE ($1::bigint[] IS NULL OR id = ANY($1))",
        )
        .bind(visible_ids)
        .fetch_one(pool)
        .await
    }

    /// Apply a partial update plus (optionally) a full assignment replace,
    /// in a single transaction.
    ///
    /// Omitted fields are untouched. `closed_at` is stamped when the status
    /// moves to `closed` and cleared when it moves away. The assignment
    /// replace deletes all current rows and inserts the supplied officers
    /// fresh -- re-assignment timestamps reset for everyone.
    ///
    /// Returns `None` if the report does not exist. Notifications are the
    /// caller's concern, after this commits.
    pub async fn apply_update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReport,
        assigned_by: DbId,
    ) -> Result<Option<Report>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE reports SET
                status = COALESCE($2, status),
                priority = COALESCE($3, priority),
                closed_at = CASE
                    WHEN $2 IS NULL THEN closed_at
                    WHEN $2 = '{STATUS_CLOSED}' THEN COALESCE(closed_at, NOW())
                    ELSE NULL
                END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let report = sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(input.status.as_deref())
            .bind(input.priority.as_deref())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(report) = report else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(officer_ids) = &input.assigned_officer_ids {
            sqlx::query("DELETE FROM assignments WHERE report_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for officer_id in officer_ids {
                sqlx::query(
                    "INSERT INTO assignments (report_id, officer_id, assigned_by)
                     VALUES ($1, $2, $3)",
                )
                .bind(id)
                .bind(officer_id)
                .bind(assigned_by)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(report))
    }

    /// Close an open report, stamping `closed_at`. Used by triage.
    ///
    /// The status predicate makes a concurrent double-close a no-op:
    /// returns `None` if the report is no longer open.
    pub async fn close_if_open(pool: &PgPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET status = '{STATUS_CLOSED}', closed_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status = '{STATUS_OPEN}'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

/// Whether an error is a unique violation on the reference number.
fn is_reference_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_reports_reference_number")
        }
        _ => false,
    }
}
