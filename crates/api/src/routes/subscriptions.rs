//! Route definitions for officer subscriptions.
//!
//! Mounted at `/subscriptions` by `api_routes()`.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::subscriptions;
use crate::state::AppState;

/// Subscription routes.
///
/// ```text
/// GET    /        -> list_subscriptions
/// POST   /        -> create_subscription
/// DELETE /{id}    -> delete_subscription
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(subscriptions::create_subscription).get(subscriptions::list_subscriptions),
        )
        .route("/{id}", delete(subscriptions::delete_subscription))
}
