//! Smoke tests for the health probe and the chat endpoint's upstream
//! failure surface.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_active_user, login_token, post_json_auth};
use sqlx::PgPool;

/// GET /health returns 200 without authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_health(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

/// With no analysis provider configured, the chat endpoint surfaces 503 --
/// there is no safe default for a direct question.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_chat_without_provider_is_503(pool: PgPool) {
    let (_user, password) = create_active_user(&pool, "chat@moe.gov.gy", "officer").await;

    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "chat@moe.gov.gy", &password).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/chat",
        serde_json::json!({ "message": "How many open reports are there?" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

/// A blank chat message is rejected before touching the provider.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_chat_requires_message(pool: PgPool) {
    let (_user, password) = create_active_user(&pool, "blank@moe.gov.gy", "officer").await;

    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "blank@moe.gov.gy", &password).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/chat",
        serde_json::json!({ "message": "   " }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
