//! Report comment (audit trail) model and DTOs.

use edualert_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Comment row attached to a report. Append-only.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReportComment {
    pub id: DbId,
    pub report_id: DbId,
    pub user_id: DbId,
    pub comment: String,
    pub created_at: Timestamp,
}

/// Comment joined with its author's name for listing responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub report_id: DbId,
    pub user_id: DbId,
    pub author_name: String,
    pub comment: String,
    pub created_at: Timestamp,
}

/// DTO for adding a comment.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub comment: String,
}
