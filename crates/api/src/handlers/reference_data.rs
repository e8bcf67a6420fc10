//! Public reference-data listings used by the citizen submission form.

use axum::extract::{Query, State};
use axum::Json;
use edualert_db::models::school::{Region, School, SchoolLevel, SchoolListParams};
use edualert_db::repositories::SchoolRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /regions
pub async fn list_regions(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Region>>>> {
    let regions = SchoolRepo::list_regions(&state.pool).await?;
    Ok(Json(DataResponse { data: regions }))
}

/// GET /school-levels
pub async fn list_school_levels(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SchoolLevel>>>> {
    let levels = SchoolRepo::list_school_levels(&state.pool).await?;
    Ok(Json(DataResponse { data: levels }))
}

/// GET /schools?region_id=&school_level_id=
pub async fn list_schools(
    State(state): State<AppState>,
    Query(params): Query<SchoolListParams>,
) -> AppResult<Json<DataResponse<Vec<School>>>> {
    let schools = SchoolRepo::list_schools(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: schools }))
}
