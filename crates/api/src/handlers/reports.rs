//! Handlers for the `/reports` resource: public submission, scoped listing
//! and detail, the mutation gateway, comments, and the triage trigger.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use edualert_core::error::CoreError;
use edualert_core::pagination::{clamp_limit, clamp_offset, DEFAULT_REPORT_LIMIT, MAX_REPORT_LIMIT};
use edualert_core::report;
use edualert_core::types::DbId;
use edualert_db::models::assignment::AssignmentWithOfficer;
use edualert_db::models::comment::{CommentWithAuthor, CreateComment, ReportComment};
use edualert_db::models::report::{
    CreateReport, Report, ReportListParams, ReportWithSchool, UpdateReport,
};
use edualert_db::repositories::{AssignmentRepo, CommentRepo, ReportRepo, SchoolRepo};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireSenior;
use crate::notify;
use crate::response::DataResponse;
use crate::scope::{resolve_report_scope, ReportScope};
use crate::state::AppState;
use crate::triage;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response body for the public submission endpoint.
#[derive(Debug, Serialize)]
pub struct CreateReportResponse {
    pub reference_number: String,
    pub report: Report,
}

/// Response body for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct ReportListResponse {
    pub reports: Vec<ReportWithSchool>,
    pub total: i64,
    pub has_more: bool,
}

/// Report detail: the report plus its active assignees.
#[derive(Debug, Serialize)]
pub struct ReportDetail {
    pub report: ReportWithSchool,
    pub assignees: Vec<AssignmentWithOfficer>,
}

/// Request body for the triage trigger endpoint.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub report_id: DbId,
}

// ---------------------------------------------------------------------------
// POST /reports  (public)
// ---------------------------------------------------------------------------

/// Accept a citizen submission.
///
/// The report is created `open`/`medium` and the response returns
/// immediately with the reference number; triage runs in the background
/// and never blocks or fails the submission.
pub async fn submit_report(
    State(state): State<AppState>,
    Json(input): Json<CreateReport>,
) -> AppResult<(StatusCode, Json<CreateReportResponse>)> {
    report::validate_short_field("grade", &input.grade)?;
    report::validate_short_field("teacher_name", &input.teacher_name)?;
    report::validate_short_field("subject", &input.subject)?;
    report::validate_reporter_type(&input.reporter_type)?;
    report::validate_description(&input.description)?;

    // Resolve the school up front for a clean 400 instead of an FK error.
    SchoolRepo::find_by_id(&state.pool, input.school_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown school id {}",
                input.school_id
            )))
        })?;

    let created = ReportRepo::create(&state.pool, &input).await?;

    tracing::info!(
        report_id = created.id,
        reference = %created.reference_number,
        "Report submitted"
    );

    triage::spawn_triage(&state, created.id);

    Ok((
        StatusCode::CREATED,
        Json(CreateReportResponse {
            reference_number: created.reference_number.clone(),
            report: created,
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /reports
// ---------------------------------------------------------------------------

/// List reports visible to the caller, newest first.
///
/// Officer results are pre-filtered by the scope resolver; an officer with
/// no assignments and no subscriptions gets an empty page without touching
/// the reports table.
pub async fn list_reports(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<ReportListResponse>> {
    if let Some(ref status) = params.status {
        report::validate_status(status)?;
    }
    if let Some(ref priority) = params.priority {
        report::validate_priority(priority)?;
    }

    let scope = resolve_report_scope(&state.pool, auth.user_id, &auth.role).await?;
    if scope.is_empty_restriction() {
        return Ok(Json(ReportListResponse {
            reports: Vec::new(),
            total: 0,
            has_more: false,
        }));
    }

    let limit = clamp_limit(params.limit, DEFAULT_REPORT_LIMIT, MAX_REPORT_LIMIT);
    let offset = clamp_offset(params.offset);

    let reports = ReportRepo::list_filtered(
        &state.pool,
        params.status.as_deref(),
        params.priority.as_deref(),
        scope.visible_ids(),
        limit,
        offset,
    )
    .await?;

    let total = ReportRepo::count_filtered(
        &state.pool,
        params.status.as_deref(),
        params.priority.as_deref(),
        scope.visible_ids(),
    )
    .await?;

    let has_more = offset + (reports.len() as i64) < total;

    Ok(Json(ReportListResponse {
        reports,
        total,
        has_more,
    }))
}

// ---------------------------------------------------------------------------
// GET /reports/{id}
// ---------------------------------------------------------------------------

/// Fetch one report with its assignees, honoring the caller's scope.
///
/// Out-of-scope reports return 404 rather than 403 so officers cannot
/// probe for the existence of reports they may not see.
pub async fn get_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReportDetail>>> {
    let scope = resolve_report_scope(&state.pool, auth.user_id, &auth.role).await?;
    let report = load_scoped_report(&state, id, &scope).await?;
    let assignees = AssignmentRepo::list_for_report(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: ReportDetail { report, assignees },
    }))
}

// ---------------------------------------------------------------------------
// GET /reports/reference/{reference_number}  (public)
// ---------------------------------------------------------------------------

/// Public status lookup by reference number, for citizens who submitted.
pub async fn get_report_by_reference(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> AppResult<Json<DataResponse<ReportWithSchool>>> {
    let report = ReportRepo::find_by_reference(&state.pool, reference.trim())
        .await?
        // Maps to 404 via the sqlx classifier.
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// PATCH /reports/{id}
// ---------------------------------------------------------------------------

/// The mutation gateway: partial status/priority update plus full-replace
/// officer assignment, in one transaction.
///
/// Assignment emails go out after commit, fire-and-forget; their failure
/// never surfaces here.
pub async fn update_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReport>,
) -> AppResult<Json<serde_json::Value>> {
    if let Some(ref status) = input.status {
        report::validate_status(status)?;
    }
    if let Some(ref priority) = input.priority {
        report::validate_priority(priority)?;
    }

    let scope = resolve_report_scope(&state.pool, auth.user_id, &auth.role).await?;
    if !scope.contains(id) {
        return Err(not_found(id));
    }

    let updated = ReportRepo::apply_update(&state.pool, id, &input, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        report_id = id,
        user_id = auth.user_id,
        status = %updated.status,
        priority = %updated.priority,
        reassigned = input.assigned_officer_ids.is_some(),
        "Report updated"
    );

    // Post-commit side effect: notify the new assignees.
    if let Some(officer_ids) = input.assigned_officer_ids {
        if !officer_ids.is_empty() {
            if let Some(report) = ReportRepo::find_by_id(&state.pool, id).await? {
                let state = state.clone();
                tokio::spawn(async move {
                    notify::notify_assignment(&state, &report, &officer_ids).await;
                });
            }
        }
    }

    Ok(Json(json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// POST /reports/analyze
// ---------------------------------------------------------------------------

/// Manually (re-)trigger triage for a report. Senior staff only.
///
/// Safe to repeat: a report that already left `open` status yields a 400
/// conflict and no further changes.
pub async fn analyze_report(
    RequireSenior(user): RequireSenior,
    State(state): State<AppState>,
    Json(input): Json<AnalyzeRequest>,
) -> AppResult<Json<triage::TriageOutcome>> {
    tracing::info!(
        report_id = input.report_id,
        user_id = user.user_id,
        "Manual triage trigger"
    );
    let outcome = triage::run_triage(&state, input.report_id).await?;
    Ok(Json(outcome))
}

// ---------------------------------------------------------------------------
// GET /reports/{id}/comments
// ---------------------------------------------------------------------------

/// List a report's comments oldest-first, honoring the caller's scope.
pub async fn list_comments(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CommentWithAuthor>>>> {
    let scope = resolve_report_scope(&state.pool, auth.user_id, &auth.role).await?;
    load_scoped_report(&state, id, &scope).await?;

    let comments = CommentRepo::list_for_report(&state.pool, id).await?;
    Ok(Json(DataResponse { data: comments }))
}

// ---------------------------------------------------------------------------
// POST /reports/{id}/comments
// ---------------------------------------------------------------------------

/// Append a comment to a report. No validation beyond non-empty content.
pub async fn add_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<ReportComment>>)> {
    let trimmed = input.comment.trim();
    if trimmed.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Missing field: comment".into(),
        )));
    }

    let scope = resolve_report_scope(&state.pool, auth.user_id, &auth.role).await?;
    load_scoped_report(&state, id, &scope).await?;

    let comment = CommentRepo::create(&state.pool, id, auth.user_id, trimmed).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a report, mapping both "absent" and "out of scope" to 404.
async fn load_scoped_report(
    state: &AppState,
    id: DbId,
    scope: &ReportScope,
) -> AppResult<ReportWithSchool> {
    if !scope.contains(id) {
        return Err(not_found(id));
    }
    ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Report",
        id,
    })
}
