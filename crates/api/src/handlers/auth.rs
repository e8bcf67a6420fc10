//! Handlers for the `/auth` resource (login, registration, verification,
//! password reset, profile).
//!
//! Failure-message policy: login distinguishes "bad credentials" from
//! "pending approval" and "unverified" (three user-visible reasons), while
//! the forgot-password flow returns one uniform message regardless of
//! whether the account exists. That asymmetry is deliberate product
//! behaviour.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use chrono::Utc;
use edualert_core::account::{
    PURPOSE_RESET_PASSWORD, PURPOSE_VERIFY_EMAIL, RESET_TOKEN_TTL_MINS, VERIFY_TOKEN_TTL_HOURS,
};
use edualert_core::email::{is_ministry_email, normalize_email, validate_ministry_email};
use edualert_core::error::CoreError;
use edualert_core::hashing::sha256_hex;
use edualert_core::roles::ROLE_OFFICER;
use edualert_db::models::account_token::CreateAccountToken;
use edualert_db::models::user::{CreateUser, User, UserResponse};
use edualert_db::repositories::{AccountTokenRepo, UserRepo};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::jwt::generate_session_token;
use crate::auth::password::{
    hash_password, validate_password_length, validate_password_strength, verify_password,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notify::send_account_email;
use crate::state::AppState;
use edualert_notify::messages;

/// Uniform response for the forgot-password flow, sent whether or not the
/// account exists.
const RESET_SENT_MESSAGE: &str =
    "If an account exists for that address, a password reset link has been sent.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response. The same token is also set as the
/// `auth-token` cookie; the body copy serves non-browser clients.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Request body for `POST /auth/verify-email`.
#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Request body for `POST /auth/forgot-password`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Request body for `PATCH /auth/profile`. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub new_password: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /auth/login
// ---------------------------------------------------------------------------

/// Authenticate with email + password and establish a session.
///
/// Account-state checks run before password verification, so an unverified
/// or unapproved account gets its specific 403 even with a wrong password.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let email = normalize_email(&input.email);

    // Non-ministry addresses can never hold an account; same generic 401
    // as a failed lookup so the check reveals nothing.
    if !is_ministry_email(&email) {
        return Err(invalid_credentials());
    }

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_verified {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account email is not verified. Check your inbox for the verification link.".into(),
        )));
    }

    if !user.is_approved {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is pending administrator approval.".into(),
        )));
    }

    match verify_password(&input.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => return Err(invalid_credentials()),
        Err(e) => {
            // Unusable hash (e.g. the seeded system user). Treat as a
            // failed login rather than leaking a 500.
            tracing::warn!(user_id = user.id, error = %e, "Password hash unusable");
            return Err(invalid_credentials());
        }
    }

    let token = generate_session_token(
        user.id,
        &user.email,
        &user.role,
        user.is_approved,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    let cookie = session_cookie(token.clone(), &state.config);
    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// The generic 401 for every credential failure on the login path.
fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

// ---------------------------------------------------------------------------
// POST /auth/logout
// ---------------------------------------------------------------------------

/// Clear the session cookie. Purely client-side: issued tokens remain
/// valid until natural expiry (no server-side revocation list).
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.add(clear_session_cookie(&state.config)),
        StatusCode::NO_CONTENT,
    )
}

// ---------------------------------------------------------------------------
// GET /auth/validate
// ---------------------------------------------------------------------------

/// Return the current user for a valid session, 401 otherwise.
pub async fn validate(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(json!({ "user": UserResponse::from(user) })))
}

// ---------------------------------------------------------------------------
// POST /auth/register
// ---------------------------------------------------------------------------

/// Register a new officer account (unverified, unapproved) and email a
/// verification link.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let email = normalize_email(&input.email);
    validate_ministry_email(&email).map_err(AppError::Core)?;
    validate_password_strength(&input.password).map_err(AppError::Core)?;

    let full_name = input.full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Missing field: full_name".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A duplicate email violates uq_users_email and surfaces as 409.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
            full_name: full_name.to_string(),
            role: ROLE_OFFICER.to_string(),
        },
    )
    .await?;

    issue_verification_email(&state, &user).await?;

    tracing::info!(user_id = user.id, "Officer account registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": UserResponse::from(user) })),
    ))
}

/// Issue a verification token and spawn the email send.
async fn issue_verification_email(state: &AppState, user: &User) -> AppResult<()> {
    let token = Uuid::new_v4().to_string();
    AccountTokenRepo::create(
        &state.pool,
        &CreateAccountToken {
            user_id: user.id,
            token_hash: sha256_hex(token.as_bytes()),
            purpose: PURPOSE_VERIFY_EMAIL.to_string(),
            expires_at: Utc::now() + chrono::Duration::hours(VERIFY_TOKEN_TTL_HOURS),
        },
    )
    .await?;

    let link = format!(
        "{}/verify-email?token={token}",
        state.config.portal_base_url
    );
    let (subject, body) = messages::verification_email(&user.full_name, &link);

    let state = state.clone();
    let to_email = user.email.clone();
    tokio::spawn(async move {
        send_account_email(&state, &to_email, subject, body).await;
    });

    Ok(())
}

// ---------------------------------------------------------------------------
// POST /auth/verify-email
// ---------------------------------------------------------------------------

/// Consume a verification token and mark the account verified.
pub async fn verify_email(
    State(state): State<AppState>,
    Json(input): Json<VerifyEmailRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let token = AccountTokenRepo::find_valid(
        &state.pool,
        &sha256_hex(input.token.trim().as_bytes()),
        PURPOSE_VERIFY_EMAIL,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Invalid or expired verification token".into(),
        ))
    })?;

    AccountTokenRepo::mark_used(&state.pool, token.id).await?;
    UserRepo::mark_verified(&state.pool, token.user_id).await?;

    tracing::info!(user_id = token.user_id, "Email address verified");

    Ok(Json(json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// POST /auth/forgot-password
// ---------------------------------------------------------------------------

/// Issue a password-reset link.
///
/// Always returns the same 200 message so the endpoint cannot be used to
/// enumerate accounts.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let email = normalize_email(&input.email);

    if let Some(user) = UserRepo::find_by_email(&state.pool, &email).await? {
        // Only the newest link stays valid.
        AccountTokenRepo::invalidate_for_user(&state.pool, user.id, PURPOSE_RESET_PASSWORD)
            .await?;

        let token = Uuid::new_v4().to_string();
        AccountTokenRepo::create(
            &state.pool,
            &CreateAccountToken {
                user_id: user.id,
                token_hash: sha256_hex(token.as_bytes()),
                purpose: PURPOSE_RESET_PASSWORD.to_string(),
                expires_at: Utc::now() + chrono::Duration::minutes(RESET_TOKEN_TTL_MINS),
            },
        )
        .await?;

        let link = format!(
            "{}/reset-password?token={token}",
            state.config.portal_base_url
        );
        let (subject, body) = messages::password_reset_email(&user.full_name, &link);

        let state = state.clone();
        tokio::spawn(async move {
            send_account_email(&state, &user.email, subject, body).await;
        });
    }

    Ok(Json(json!({ "message": RESET_SENT_MESSAGE })))
}

// ---------------------------------------------------------------------------
// POST /auth/reset-password
// ---------------------------------------------------------------------------

/// Consume a reset token and set a new password (strict policy).
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_password_strength(&input.new_password).map_err(AppError::Core)?;

    let token = AccountTokenRepo::find_valid(
        &state.pool,
        &sha256_hex(input.token.trim().as_bytes()),
        PURPOSE_RESET_PASSWORD,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Invalid or expired reset token".into(),
        ))
    })?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    AccountTokenRepo::mark_used(&state.pool, token.id).await?;
    UserRepo::update_password(&state.pool, token.user_id, &password_hash).await?;

    tracing::info!(user_id = token.user_id, "Password reset completed");

    Ok(Json(json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// PATCH /auth/profile
// ---------------------------------------------------------------------------

/// Update the caller's own profile (name and/or password).
///
/// The password rule here is the looser minimum-length-only policy; the
/// strict policy applies to registration and reset.
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if input.full_name.is_none() && input.new_password.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update".into(),
        )));
    }

    if let Some(full_name) = &input.full_name {
        let trimmed = full_name.trim();
        if trimmed.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Missing field: full_name".into(),
            )));
        }
        UserRepo::update_full_name(&state.pool, auth.user_id, trimmed).await?;
    }

    if let Some(new_password) = &input.new_password {
        validate_password_length(new_password).map_err(AppError::Core)?;
        let password_hash = hash_password(new_password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        UserRepo::update_password(&state.pool, auth.user_id, &password_hash).await?;
    }

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(json!({ "user": UserResponse::from(user) })))
}
