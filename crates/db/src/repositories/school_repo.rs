//! Repository for the region / school-level / school dimension tables.

use edualert_core::types::DbId;
use sqlx::PgPool;

use crate::models::school::{Region, School, SchoolContext, SchoolLevel, SchoolListParams};

/// Read-only access to the reference dimensions.
pub struct SchoolRepo;

impl SchoolRepo {
    /// List all regions in id order.
    pub async fn list_regions(pool: &PgPool) -> Result<Vec<Region>, sqlx::Error> {
        sqlx::query_as::<_, Region>("SELECT id, name FROM regions ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// List all school levels in id order.
    pub async fn list_school_levels(pool: &PgPool) -> Result<Vec<SchoolLevel>, sqlx::Error> {
        sqlx::query_as::<_, SchoolLevel>("SELECT id, name FROM school_levels ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// List schools, optionally filtered by region and/or level.
    pub async fn list_schools(
        pool: &PgPool,
        params: &SchoolListParams,
    ) -> Result<Vec<School>, sqlx::Error> {
        sqlx::query_as::<_, School>(
            "SELECT id, name, region_id, school_level_id FROM schools
             WHERE ($1::bigint IS NULL OR region_id = $1)
               AND ($2::bigint IS NULL OR school_level_id = $2)
             ORDER BY name",
        )
        .bind(params.region_id)
        .bind(params.school_level_id)
        .fetch_all(pool)
        .await
    }

    /// Find a school by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<School>, sqlx::Error> {
        sqlx::query_as::<_, School>(
            "SELECT id, name, region_id, school_level_id FROM schools WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a school joined with its region and level names.
    pub async fn find_context(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SchoolContext>, sqlx::Error> {
        sqlx::query_as::<_, SchoolContext>(
            "SELECT s.id, s.name, s.region_id, r.name AS region_name,
                    s.school_level_id, l.name AS school_level_name
             FROM schools s
             JOIN regions r ON r.id = s.region_id
             JOIN school_levels l ON l.id = s.school_level_id
             WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
