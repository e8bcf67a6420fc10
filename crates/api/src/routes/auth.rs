//! Route definitions for authentication and account flows.
//!
//! Mounted at `/auth` by `api_routes()`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes.
///
/// ```text
/// POST   /login            -> login
/// POST   /logout           -> logout
/// GET    /validate         -> validate
/// POST   /register         -> register
/// POST   /verify-email     -> verify_email
/// POST   /forgot-password  -> forgot_password
/// POST   /reset-password   -> reset_password
/// PATCH  /profile          -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/validate", get(auth::validate))
        .route("/register", post(auth::register))
        .route("/verify-email", post(auth::verify_email))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .route("/profile", patch(auth::update_profile))
}
