//! Route definitions for user administration.
//!
//! Mounted at `/admin` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes.
///
/// ```text
/// GET    /users               -> list_users (senior/admin)
/// POST   /users/{id}/approve  -> approve_user (admin)
/// PATCH  /users/{id}          -> update_user (admin)
/// DELETE /users/{id}          -> delete_user (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}/approve", post(admin::approve_user))
        .route(
            "/users/{id}",
            axum::routing::patch(admin::update_user).delete(admin::delete_user),
        )
}
