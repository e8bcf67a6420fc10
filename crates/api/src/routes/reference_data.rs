//! Route definitions for public reference data.
//!
//! Merged directly into `api_routes()` (no nesting prefix).

use axum::routing::get;
use axum::Router;

use crate::handlers::reference_data;
use crate::state::AppState;

/// Reference-data routes.
///
/// ```text
/// GET /regions        -> list_regions
/// GET /school-levels  -> list_school_levels
/// GET /schools        -> list_schools
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/regions", get(reference_data::list_regions))
        .route("/school-levels", get(reference_data::list_school_levels))
        .route("/schools", get(reference_data::list_schools))
}
