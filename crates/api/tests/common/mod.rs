//! Shared harness for HTTP-level integration tests.
//!
//! Builds the application router through the same [`build_app_router`]
//! used by the production binary, so tests exercise the identical
//! middleware stack (CORS, request ID, timeout, tracing, panic recovery).

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use edualert_api::auth::jwt::JwtConfig;
use edualert_api::auth::password::hash_password;
use edualert_api::config::ServerConfig;
use edualert_api::router::build_app_router;
use edualert_api::state::AppState;
use edualert_db::models::user::{CreateUser, User};
use edualert_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cookie_secure: false,
        portal_base_url: "http://localhost:5173".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-with-plenty-of-entropy".to_string(),
            session_expiry_hours: 24,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Analysis and email providers are unconfigured, so
/// triage fails open and notifications are skipped.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        analysis: None,
        mailer: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request with no credentials.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Issue a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Issue a GET request carrying the session cookie.
pub async fn get_with_cookie(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("cookie", format!("auth-token={token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Issue a JSON request with the given method, without credentials.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Issue a JSON request with the given method and a Bearer token.
pub async fn send_json_auth(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Issue an unauthenticated POST with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body).await
}

/// Issue an authenticated POST with a JSON body.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_json_auth(app, "POST", uri, body, token).await
}

/// Issue an authenticated PATCH with a JSON body.
pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_json_auth(app, "PATCH", uri, body, token).await
}

/// Issue an authenticated DELETE.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a verified, approved user directly in the database and return
/// the row plus the plaintext password used.
pub async fn create_active_user(pool: &PgPool, email: &str, role: &str) -> (User, String) {
    let password = "Sup3r-secret!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hashed,
            full_name: "Test Officer".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed");

    UserRepo::mark_verified(pool, user.id)
        .await
        .expect("verify should succeed");
    let user = UserRepo::approve(pool, user.id)
        .await
        .expect("approve should succeed")
        .expect("user should exist");

    (user, password.to_string())
}

/// Log in a user via the API and return the session token from the body.
pub async fn login_token(app: Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("login response must contain token")
        .to_string()
}

/// Insert a school under an already-seeded region and level, returning its id.
pub async fn create_school(
    pool: &PgPool,
    name: &str,
    region_id: i64,
    school_level_id: i64,
) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO schools (name, region_id, school_level_id)
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(region_id)
    .bind(school_level_id)
    .fetch_one(pool)
    .await
    .expect("school insert should succeed");
    row.0
}

/// Submit a report directly through the repository, returning its id.
pub async fn create_report(pool: &PgPool, school_id: i64, teacher_name: &str) -> i64 {
    use edualert_db::models::report::CreateReport;
    use edualert_db::repositories::ReportRepo;

    let report = ReportRepo::create(
        pool,
        &CreateReport {
            school_id,
            grade: "Grade 6".to_string(),
            teacher_name: teacher_name.to_string(),
            subject: "Mathematics".to_string(),
            reporter_type: "parent".to_string(),
            description: "Absent 3 days, no substitute arranged".to_string(),
        },
    )
    .await
    .expect("report creation should succeed");
    report.id
}
