//! HTTP-level integration tests for authentication and account flows.
//!
//! Covers login state distinctions (bad credentials vs unverified vs
//! unapproved), session cookies, registration policy, the uniform
//! forgot-password reply, and the deliberately looser profile password
//! rule.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_active_user, get_auth, get_with_cookie, login_token, patch_json_auth,
    post_json,
};
use edualert_db::models::user::CreateUser;
use edualert_db::repositories::UserRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with a token, user info, and the
/// `auth-token` cookie (HttpOnly, SameSite=Lax).
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, password) = create_active_user(&pool, "login@moe.gov.gy", "officer").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "login@moe.gov.gy", "password": password });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("login must set a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("auth-token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let json = body_json(response).await;
    assert!(json["token"].is_string(), "response must contain token");
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "login@moe.gov.gy");
    assert_eq!(json["user"]["role"], "officer");
}

/// Email is normalized before lookup: mixed case and whitespace still log in.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_normalizes_email(pool: PgPool) {
    let (_user, password) = create_active_user(&pool, "case@moe.gov.gy", "officer").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "  Case@MOE.gov.GY ", "password": password });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let (_user, _password) = create_active_user(&pool, "wrongpw@moe.gov.gy", "officer").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "wrongpw@moe.gov.gy", "password": "incorrect!" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent email returns the same generic 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@moe.gov.gy", "password": "whatever" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An unapproved account gets 403 naming pending approval, and no cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unapproved_user(pool: PgPool) {
    let password = "Sup3r-secret!";
    let hashed = edualert_api::auth::password::hash_password(password).unwrap();
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            email: "pending@moe.gov.gy".to_string(),
            password_hash: hashed,
            full_name: "Pending Officer".to_string(),
            role: "officer".to_string(),
        },
    )
    .await
    .unwrap();
    UserRepo::mark_verified(&pool, user.id).await.unwrap();
    // Deliberately NOT approved.

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "pending@moe.gov.gy", "password": password });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(
        response.headers().get("set-cookie").is_none(),
        "failed login must not set a session cookie"
    );
    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("approval"),
        "message should indicate pending approval"
    );
}

/// An unverified account gets 403 naming verification.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unverified_user(pool: PgPool) {
    let password = "Sup3r-secret!";
    let hashed = edualert_api::auth::password::hash_password(password).unwrap();
    UserRepo::create(
        &pool,
        &CreateUser {
            email: "unverified@moe.gov.gy".to_string(),
            password_hash: hashed,
            full_name: "Unverified Officer".to_string(),
            role: "officer".to_string(),
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "unverified@moe.gov.gy", "password": password });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("verified"));
}

/// A non-ministry address is indistinguishable from bad credentials.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_foreign_domain(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "someone@gmail.com", "password": "whatever" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Session validation
// ---------------------------------------------------------------------------

/// /auth/validate accepts the token via Bearer header.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_validate_with_bearer(pool: PgPool) {
    let (user, password) = create_active_user(&pool, "bearer@moe.gov.gy", "officer").await;
    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "bearer@moe.gov.gy", &password).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/auth/validate", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);
}

/// /auth/validate accepts the token via the session cookie.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_validate_with_cookie(pool: PgPool) {
    let (_user, password) = create_active_user(&pool, "cookie@moe.gov.gy", "officer").await;
    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "cookie@moe.gov.gy", &password).await;

    let app = common::build_test_app(pool);
    let response = get_with_cookie(app, "/api/auth/validate", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
}

/// A garbage token is a 401, not a 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_validate_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/auth/validate", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Missing credentials entirely is also a 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_validate_missing_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/auth/validate").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration creates an unverified, unapproved officer account.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "email": "newbie@moe.gov.gy",
        "password": "Str0ng-pass!",
        "full_name": "New Officer"
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "newbie@moe.gov.gy");
    assert_eq!(json["user"]["role"], "officer");
    assert_eq!(json["user"]["is_verified"], false);
    assert_eq!(json["user"]["is_approved"], false);

    let user = UserRepo::find_by_email(&pool, "newbie@moe.gov.gy")
        .await
        .unwrap()
        .expect("user should be persisted");
    assert!(!user.is_verified);
}

/// Registering an already-used email returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    create_active_user(&pool, "dup@moe.gov.gy", "officer").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "dup@moe.gov.gy",
        "password": "Str0ng-pass!",
        "full_name": "Dup"
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Registration rejects non-ministry addresses.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_foreign_domain(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "x@example.com",
        "password": "Str0ng-pass!",
        "full_name": "X"
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Registration enforces the strict password policy (all four classes).
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_weak_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Long enough, but no uppercase, digit, or symbol.
    let body = serde_json::json!({
        "email": "weak@moe.gov.gy",
        "password": "alllowercase",
        "full_name": "Weak"
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Forgot / reset password
// ---------------------------------------------------------------------------

/// The forgot-password reply is identical whether or not the account
/// exists (no account enumeration).
#[sqlx::test(migrations = "../db/migrations")]
async fn test_forgot_password_uniform_response(pool: PgPool) {
    create_active_user(&pool, "real@moe.gov.gy", "officer").await;

    let app = common::build_test_app(pool.clone());
    let for_real = post_json(
        app,
        "/api/auth/forgot-password",
        serde_json::json!({ "email": "real@moe.gov.gy" }),
    )
    .await;
    assert_eq!(for_real.status(), StatusCode::OK);
    let real_json = body_json(for_real).await;

    let app = common::build_test_app(pool);
    let for_ghost = post_json(
        app,
        "/api/auth/forgot-password",
        serde_json::json!({ "email": "ghost@moe.gov.gy" }),
    )
    .await;
    assert_eq!(for_ghost.status(), StatusCode::OK);
    let ghost_json = body_json(for_ghost).await;

    assert_eq!(real_json, ghost_json, "replies must be indistinguishable");
}

/// Resetting with an unknown token is a 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reset_password_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "token": "bogus", "new_password": "Str0ng-pass!" });
    let response = post_json(app, "/api/auth/reset-password", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Profile update
// ---------------------------------------------------------------------------

/// The profile flow accepts a password the strict policy would reject
/// (minimum length only), and rejects one below the minimum.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_password_policy_is_looser(pool: PgPool) {
    let (_user, password) = create_active_user(&pool, "prof@moe.gov.gy", "officer").await;
    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "prof@moe.gov.gy", &password).await;

    // Length-only: no uppercase, digit, or symbol, yet accepted.
    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        "/api/auth/profile",
        serde_json::json!({ "new_password": "alllowercase" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Below the minimum length is still rejected.
    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        "/api/auth/profile",
        serde_json::json!({ "new_password": "short" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The accepted password now logs in.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "prof@moe.gov.gy", "password": "alllowercase" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Updating with no fields is a 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_update_requires_a_field(pool: PgPool) {
    let (_user, password) = create_active_user(&pool, "empty@moe.gov.gy", "officer").await;
    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "empty@moe.gov.gy", &password).await;

    let app = common::build_test_app(pool);
    let response = patch_json_auth(app, "/api/auth/profile", serde_json::json!({}), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
