//! Automated triage for newly submitted reports.
//!
//! Triage runs once per report, while the report is still `open`: the
//! external classifier either approves the submission (notifications fan
//! out to interested officers) or closes it with an explanatory system
//! comment. Any classifier failure falls back to the fail-open verdict --
//! a broken provider must never silently discard legitimate reports.
//!
//! The submission endpoint spawns [`run_triage`] fire-and-forget; the
//! analyze endpoint calls it synchronously for manual re-triggers. Either
//! way a non-`open` report is rejected up front, which makes repeated
//! triggers safe no-ops after the first successful transition.

use edualert_analysis::{ReportContext, Verdict};
use edualert_core::error::CoreError;
use edualert_core::report::STATUS_OPEN;
use edualert_core::types::DbId;
use edualert_db::models::report::ReportWithSchool;
use edualert_db::repositories::{CommentRepo, ReportRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::notify;
use crate::state::AppState;

/// Outcome of a triage run, returned by the analyze endpoint.
#[derive(Debug, Serialize)]
pub struct TriageOutcome {
    /// `"approved"` or `"closed"`.
    pub action: &'static str,
    /// Classifier justification (or the fail-open explanation).
    pub reason: String,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Run the triage pipeline for one report.
///
/// Returns [`CoreError::Conflict`] if the report is not in `open` status,
/// and [`CoreError::NotFound`] if it does not exist. Comment insertion and
/// notification fan-out are best-effort side effects; only the status
/// transition itself can fail the run.
pub async fn run_triage(state: &AppState, report_id: DbId) -> AppResult<TriageOutcome> {
    let report = ReportRepo::find_by_id(&state.pool, report_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id: report_id,
        }))?;

    if report.status != STATUS_OPEN {
        return Err(AppError::Core(CoreError::Conflict(
            "Report is not in open status".into(),
        )));
    }

    let verdict = evaluate(state, &report).await;

    let system_user = UserRepo::find_system_user(&state.pool)
        .await?
        .ok_or_else(|| AppError::InternalError("System user is not seeded".into()))?;

    if verdict.is_valid {
        append_comment(
            state,
            report.id,
            system_user.id,
            &format!(
                "Automated triage approved this report. {} (confidence {:.2})",
                verdict.reason, verdict.confidence
            ),
        )
        .await;

        // Fan out emails without blocking the caller.
        let state = state.clone();
        let approved = report.clone();
        tokio::spawn(async move {
            notify::notify_report_approved(&state, &approved).await;
        });

        tracing::info!(
            report_id,
            reference = %report.reference_number,
            confidence = verdict.confidence,
            "Report approved by triage"
        );

        Ok(TriageOutcome {
            action: "approved",
            reason: verdict.reason,
            confidence: verdict.confidence,
        })
    } else {
        // Conditional close: a concurrent transition turns this into a
        // conflict rather than a double-close.
        let closed = ReportRepo::close_if_open(&state.pool, report.id).await?;
        if closed.is_none() {
            return Err(AppError::Core(CoreError::Conflict(
                "Report is not in open status".into(),
            )));
        }

        append_comment(
            state,
            report.id,
            system_user.id,
            &format!(
                "Automated triage closed this report. Reason: {} (confidence {:.2})",
                verdict.reason, verdict.confidence
            ),
        )
        .await;

        tracing::info!(
            report_id,
            reference = %report.reference_number,
            reason = %verdict.reason,
            confidence = verdict.confidence,
            "Report closed by triage"
        );

        Ok(TriageOutcome {
            action: "closed",
            reason: verdict.reason,
            confidence: verdict.confidence,
        })
    }
}

/// Spawn triage in the background after a public submission.
///
/// The HTTP response never waits on triage; failures are logged only.
pub fn spawn_triage(state: &AppState, report_id: DbId) {
    let state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = run_triage(&state, report_id).await {
            tracing::warn!(report_id, error = %e, "Background triage failed");
        }
    });
}

/// Ask the classifier for a verdict, falling back to fail-open on any
/// provider failure or when no provider is configured.
async fn evaluate(state: &AppState, report: &ReportWithSchool) -> Verdict {
    let Some(client) = &state.analysis else {
        tracing::debug!(report_id = report.id, "Analysis provider not configured");
        return Verdict::fail_open();
    };

    let context = ReportContext {
        reference_number: report.reference_number.clone(),
        school_name: report.school_name.clone(),
        region_name: report.region_name.clone(),
        school_level_name: report.school_level_name.clone(),
        grade: report.grade.clone(),
        teacher_name: report.teacher_name.clone(),
        subject: report.subject.clone(),
        reporter_type: report.reporter_type.clone(),
        description: report.description.clone(),
    };

    match client.evaluate_report(&context).await {
        Ok(verdict) => verdict,
        Err(e) => {
            tracing::warn!(report_id = report.id, error = %e, "Analysis call failed, failing open");
            Verdict::fail_open()
        }
    }
}

/// Append a system comment, logging and swallowing failures: a missing
/// audit line must not fail a triage decision that already applied.
async fn append_comment(state: &AppState, report_id: DbId, author_id: DbId, text: &str) {
    if let Err(e) = CommentRepo::create(&state.pool, report_id, author_id, text).await {
        tracing::warn!(report_id, error = %e, "Failed to append triage comment");
    }
}
