//! Handlers for the `/subscriptions` resource.
//!
//! Subscriptions only influence visibility for the base `officer` role,
//! but any authenticated user may manage their own.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use edualert_core::error::CoreError;
use edualert_core::types::DbId;
use edualert_db::models::subscription::{CreateSubscription, Subscription, SubscriptionWithNames};
use edualert_db::repositories::SubscriptionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /subscriptions -- list the caller's active subscriptions.
pub async fn list_subscriptions(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SubscriptionWithNames>>>> {
    let subscriptions = SubscriptionRepo::list_for_officer(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: subscriptions,
    }))
}

/// POST /subscriptions -- subscribe the caller to a (region, level) pair.
///
/// A duplicate active pair returns 409; an unknown region or level id
/// fails its foreign key and returns 400.
pub async fn create_subscription(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSubscription>,
) -> AppResult<(StatusCode, Json<DataResponse<Subscription>>)> {
    let subscription = SubscriptionRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        region_id = input.region_id,
        school_level_id = input.school_level_id,
        "Subscription created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: subscription }),
    ))
}

/// DELETE /subscriptions/{id} -- soft-delete one of the caller's own
/// subscriptions. Another officer's subscription is a 404.
pub async fn delete_subscription(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = SubscriptionRepo::soft_delete(&state.pool, id, auth.user_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
