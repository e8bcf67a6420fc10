//! Route definitions for dashboard aggregates.
//!
//! Mounted at `/dashboard` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes.
///
/// ```text
/// GET /stats -> get_stats (scoped counts)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(dashboard::get_stats))
}
