//! Repository for the append-only `report_comments` table.

use edualert_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{CommentWithAuthor, ReportComment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, report_id, user_id, comment, created_at";

/// Provides append and list operations for report comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Append a comment to a report.
    pub async fn create(
        pool: &PgPool,
        report_id: DbId,
        user_id: DbId,
        comment: &str,
    ) -> Result<ReportComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO report_comments (report_id, user_id, comment)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReportComment>(&query)
            .bind(report_id)
            .bind(user_id)
            .bind(comment)
            .fetch_one(pool)
            .await
    }

    /// List a report's comments oldest-first, with author names.
    pub async fn list_for_report(
        pool: &PgPool,
        report_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.report_id, c.user_id, u.full_name AS author_name,
                    c.comment, c.created_at
             FROM report_comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.report_id = $1
             ORDER BY c.created_at",
        )
        .bind(report_id)
        .fetch_all(pool)
        .await
    }

    /// Number of comments on a report. Used by triage idempotence tests.
    pub async fn count_for_report(pool: &PgPool, report_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM report_comments WHERE report_id = $1")
                .bind(report_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
