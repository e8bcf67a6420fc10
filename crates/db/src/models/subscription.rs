//! Subscription entity model and DTOs.

use edualert_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Subscription row: an officer's interest in a (region, level) pair.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Subscription {
    pub id: DbId,
    pub officer_id: DbId,
    pub region_id: DbId,
    pub school_level_id: DbId,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

/// Subscription joined with region/level names for listing responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SubscriptionWithNames {
    pub id: DbId,
    pub officer_id: DbId,
    pub region_id: DbId,
    pub region_name: String,
    pub school_level_id: DbId,
    pub school_level_name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a subscription.
#[derive(Debug, Deserialize)]
pub struct CreateSubscription {
    pub region_id: DbId,
    pub school_level_id: DbId,
}
