//! Dashboard aggregates, filtered by the same scope resolver as the
//! report listing so the counts always agree with what the officer can
//! actually open.

use axum::extract::State;
use axum::Json;
use edualert_db::models::report::ReportStats;
use edualert_db::repositories::ReportRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::scope::resolve_report_scope;
use crate::state::AppState;

/// GET /dashboard/stats -- report counts by status and priority.
pub async fn get_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ReportStats>>> {
    let scope = resolve_report_scope(&state.pool, auth.user_id, &auth.role).await?;

    // An empty restriction means zero of everything; skip the query.
    let stats = if scope.is_empty_restriction() {
        ReportStats {
            total: 0,
            open: 0,
            in_progress: 0,
            closed: 0,
            low: 0,
            medium: 0,
            high: 0,
        }
    } else {
        ReportRepo::stats(&state.pool, scope.visible_ids()).await?
    };

    Ok(Json(DataResponse { data: stats }))
}
