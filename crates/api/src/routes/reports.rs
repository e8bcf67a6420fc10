//! Route definitions for the report pipeline.
//!
//! Mounted at `/reports` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Report routes.
///
/// ```text
/// POST   /                        -> submit_report (public)
/// GET    /                        -> list_reports (scoped)
/// POST   /analyze                 -> analyze_report (senior/admin)
/// GET    /reference/{reference}   -> get_report_by_reference (public)
/// GET    /{id}                    -> get_report (scoped)
/// PATCH  /{id}                    -> update_report (mutation gateway)
/// GET    /{id}/comments           -> list_comments (scoped)
/// POST   /{id}/comments           -> add_comment (scoped)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(reports::submit_report).get(reports::list_reports),
        )
        .route("/analyze", post(reports::analyze_report))
        .route("/reference/{reference}", get(reports::get_report_by_reference))
        .route(
            "/{id}",
            get(reports::get_report).patch(reports::update_report),
        )
        .route(
            "/{id}/comments",
            get(reports::list_comments).post(reports::add_comment),
        )
}
