//! Notification fan-out.
//!
//! Every function here is best-effort: recipient lookup and delivery
//! failures are logged and swallowed. A mutation that already committed
//! must never be reported as failed because an email did not go out.

use std::collections::HashSet;

use edualert_db::models::report::ReportWithSchool;
use edualert_db::models::user::Recipient;
use edualert_core::types::DbId;
use edualert_db::repositories::{SubscriptionRepo, UserRepo};
use edualert_notify::messages;

use crate::state::AppState;

/// Email officers with a matching subscription, plus all senior staff,
/// about a report that passed triage.
pub async fn notify_report_approved(state: &AppState, report: &ReportWithSchool) {
    let Some(mailer) = &state.mailer else {
        tracing::debug!(report_id = report.id, "Email delivery not configured, skipping fan-out");
        return;
    };

    let mut recipients: Vec<Recipient> = Vec::new();

    match SubscriptionRepo::matching_recipients(
        &state.pool,
        report.region_id,
        report.school_level_id,
    )
    .await
    {
        Ok(matching) => recipients.extend(matching),
        Err(e) => {
            tracing::warn!(report_id = report.id, error = %e, "Failed to load subscribed recipients");
        }
    }

    match UserRepo::elevated_recipients(&state.pool).await {
        Ok(elevated) => recipients.extend(elevated),
        Err(e) => {
            tracing::warn!(report_id = report.id, error = %e, "Failed to load elevated recipients");
        }
    }

    // An admin may also hold a matching subscription; send once.
    let mut seen: HashSet<DbId> = HashSet::new();
    recipients.retain(|r| seen.insert(r.id));

    for recipient in &recipients {
        let (subject, body) = messages::report_approved_email(
            &recipient.full_name,
            &report.reference_number,
            &report.school_name,
            &report.teacher_name,
        );
        if let Err(e) = mailer.deliver(&recipient.email, &subject, &body).await {
            tracing::warn!(
                report_id = report.id,
                to = %recipient.email,
                error = %e,
                "Failed to send report notification"
            );
        }
    }

    tracing::info!(
        report_id = report.id,
        recipients = recipients.len(),
        "Report approval fan-out complete"
    );
}

/// Email each newly (re-)assigned officer about their assignment.
pub async fn notify_assignment(state: &AppState, report: &ReportWithSchool, officer_ids: &[DbId]) {
    if officer_ids.is_empty() {
        return;
    }
    let Some(mailer) = &state.mailer else {
        tracing::debug!(report_id = report.id, "Email delivery not configured, skipping fan-out");
        return;
    };

    let recipients = match UserRepo::recipients_by_ids(&state.pool, officer_ids).await {
        Ok(recipients) => recipients,
        Err(e) => {
            tracing::warn!(report_id = report.id, error = %e, "Failed to load assignees");
            return;
        }
    };

    for recipient in &recipients {
        let (subject, body) = messages::assignment_email(
            &recipient.full_name,
            &report.reference_number,
            &report.school_name,
            &report.priority,
        );
        if let Err(e) = mailer.deliver(&recipient.email, &subject, &body).await {
            tracing::warn!(
                report_id = report.id,
                to = %recipient.email,
                error = %e,
                "Failed to send assignment notification"
            );
        }
    }
}

/// Email an account-flow message (verification / reset link) to one user.
pub async fn send_account_email(state: &AppState, to_email: &str, subject: String, body: String) {
    let Some(mailer) = &state.mailer else {
        tracing::debug!(to = to_email, "Email delivery not configured, skipping account email");
        return;
    };
    if let Err(e) = mailer.deliver(to_email, &subject, &body).await {
        tracing::warn!(to = to_email, error = %e, "Failed to send account email");
    }
}
