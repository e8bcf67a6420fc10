//! Region, school level, and school reference models.

use edualert_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Administrative region row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Region {
    pub id: DbId,
    pub name: String,
}

/// School level row (Nursery, Primary, Secondary).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SchoolLevel {
    pub id: DbId,
    pub name: String,
}

/// School row; the join point for subscription matching.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct School {
    pub id: DbId,
    pub name: String,
    pub region_id: DbId,
    pub school_level_id: DbId,
}

/// School joined with its region and level names, used as triage context
/// and in report detail responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SchoolContext {
    pub id: DbId,
    pub name: String,
    pub region_id: DbId,
    pub region_name: String,
    pub school_level_id: DbId,
    pub school_level_name: String,
}

/// Query filters for the public school listing.
#[derive(Debug, Deserialize)]
pub struct SchoolListParams {
    pub region_id: Option<DbId>,
    pub school_level_id: Option<DbId>,
}
