//! Repository for the `subscriptions` table.

use edualert_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscription::{CreateSubscription, Subscription, SubscriptionWithNames};
use crate::models::user::Recipient;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, officer_id, region_id, school_level_id, created_at, deleted_at";

/// Provides CRUD operations for officer subscriptions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Insert a new subscription for an officer.
    ///
    /// A duplicate active (officer, region, level) triple violates
    /// `uq_subscriptions_active` and surfaces as a 409 at the API layer.
    pub async fn create(
        pool: &PgPool,
        officer_id: DbId,
        input: &CreateSubscription,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions (officer_id, region_id, school_level_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(officer_id)
            .bind(input.region_id)
            .bind(input.school_level_id)
            .fetch_one(pool)
            .await
    }

    /// List an officer's active subscriptions with region/level names.
    pub async fn list_for_officer(
        pool: &PgPool,
        officer_id: DbId,
    ) -> Result<Vec<SubscriptionWithNames>, sqlx::Error> {
        sqlx::query_as::<_, SubscriptionWithNames>(
            "SELECT s.id, s.officer_id, s.region_id, r.name AS region_name,
                    s.school_level_id, l.name AS school_level_name, s.created_at
             FROM subscriptions s
             JOIN regions r ON r.id = s.region_id
             JOIN school_levels l ON l.id = s.school_level_id
             WHERE s.officer_id = $1 AND s.deleted_at IS NULL
             ORDER BY s.created_at DESC",
        )
        .bind(officer_id)
        .fetch_all(pool)
        .await
    }

    /// Soft-delete one of the officer's own subscriptions.
    ///
    /// Returns `true` if an active row owned by `officer_id` was removed.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        officer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE subscriptions SET deleted_at = NOW()
             WHERE id = $1 AND officer_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(officer_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Report ids visible to an officer through subscription matching.
    ///
    /// A single join covers every active subscription at once; the result
    /// is the same union the per-subscription evaluation would produce.
    pub async fn subscribed_report_ids(
        pool: &PgPool,
        officer_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT DISTINCT rep.id
             FROM reports rep
             JOIN schools sch ON sch.id = rep.school_id
             JOIN subscriptions sub
               ON sub.region_id = sch.region_id
              AND sub.school_level_id = sch.school_level_id
             WHERE sub.officer_id = $1 AND sub.deleted_at IS NULL",
        )
        .bind(officer_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Approved officers whose active subscriptions match a (region, level)
    /// pair, for triage notification fan-out.
    pub async fn matching_recipients(
        pool: &PgPool,
        region_id: DbId,
        school_level_id: DbId,
    ) -> Result<Vec<Recipient>, sqlx::Error> {
        sqlx::query_as::<_, Recipient>(
            "SELECT DISTINCT u.id, u.email, u.full_name
             FROM users u
             JOIN subscriptions s ON s.officer_id = u.id
             WHERE s.region_id = $1
               AND s.school_level_id = $2
               AND s.deleted_at IS NULL
               AND u.is_approved
               AND u.deleted_at IS NULL
             ORDER BY u.id",
        )
        .bind(region_id)
        .bind(school_level_id)
        .fetch_all(pool)
        .await
    }
}
