//! Analytics chat endpoint.
//!
//! Unlike triage, there is no safe fallback when the analysis provider is
//! down -- the user asked a direct question -- so provider failures
//! surface as 503.

use axum::extract::State;
use axum::Json;
use edualert_core::error::CoreError;
use edualert_db::models::report::ReportStats;
use edualert_db::repositories::ReportRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::scope::resolve_report_scope;
use crate::state::AppState;

/// Request body for `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body for `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /chat -- answer an analytics question over the caller's visible
/// report statistics.
pub async fn chat(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let message = input.message.trim();
    if message.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Missing field: message".into(),
        )));
    }

    let Some(client) = &state.analysis else {
        return Err(AppError::Upstream(
            "Analysis provider is not configured".into(),
        ));
    };

    // The assistant only ever sees aggregates the caller could read
    // directly from the dashboard.
    let scope = resolve_report_scope(&state.pool, auth.user_id, &auth.role).await?;
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

    let context = format_stats(&stats);

    let reply = client
        .chat(message, &context)
        .await
        .map_err(|e| AppError::Upstream(format!("Analysis provider unavailable: {e}")))?;

    Ok(Json(ChatResponse { reply }))
}

/// Render the stats block handed to the assistant as context.
fn format_stats(stats: &ReportStats) -> String {
    format!(
        "Total reports: {}\nBy status: open={}, in_progress={}, closed={}\n\
         By priority: low={}, medium={}, high={}",
        stats.total,
        stats.open,
        stats.in_progress,
        stats.closed,
        stats.low,
        stats.medium,
        stats.high,
    )
}
