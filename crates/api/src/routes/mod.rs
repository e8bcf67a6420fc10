//! Route tree assembly.

pub mod admin;
pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod health;
pub mod reference_data;
pub mod reports;
pub mod subscriptions;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     login (public)
/// /auth/logout                    clear session cookie
/// /auth/validate                  current user (requires auth)
/// /auth/register                  officer self-registration (public)
/// /auth/verify-email              consume verification token (public)
/// /auth/forgot-password           request reset link (public, uniform reply)
/// /auth/reset-password            consume reset token (public)
/// /auth/profile                   update own name/password (PATCH)
///
/// /reports                        submit (public POST), scoped list (GET)
/// /reports/analyze                manual triage trigger (senior/admin)
/// /reports/reference/{reference}  public status lookup
/// /reports/{id}                   scoped detail (GET), mutation gateway (PATCH)
/// /reports/{id}/comments          list (GET), append (POST)
///
/// /subscriptions                  own list (GET), create (POST)
/// /subscriptions/{id}             remove own (DELETE)
///
/// /dashboard/stats                scoped aggregates (GET)
///
/// /regions                        public reference data
/// /school-levels                  public reference data
/// /schools                        public reference data
///
/// /users                          approved-staff directory (requires auth)
/// /admin/users                    full list (senior), manage (admin)
///
/// /chat                           analytics assistant (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/reports", reports::router())
        .nest("/subscriptions", subscriptions::router())
        .nest("/dashboard", dashboard::router())
        .nest("/admin", admin::router())
        .nest("/chat", chat::router())
        .merge(reference_data::router())
        .route("/users", get(handlers::admin::directory))
}
