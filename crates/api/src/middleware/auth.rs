//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use edualert_core::error::CoreError;
use edualert_core::types::DbId;

use crate::auth::cookie::SESSION_COOKIE;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the `auth-token` session cookie or an
/// `Authorization: Bearer` header (cookie wins when both are present).
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's (normalized) email address.
    pub email: String,
    /// The user's role name (e.g. `"officer"`, `"senior_officer"`, `"admin"`).
    pub role: String,
}

/// Pull the session token out of the request, cookie first.
fn extract_session_token(parts: &Parts) -> Option<&str> {
    if let Some(token) = session_cookie_value(parts) {
        return Some(token);
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Find the `auth-token` cookie value in the `Cookie` header, if any.
fn session_cookie_value(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(COOKIE)?.to_str().ok()?;
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .filter(|v| !v.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing session token".into()))
        })?;

        // Any signature or expiry failure yields the same generic 401.
        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}
