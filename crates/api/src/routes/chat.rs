//! Route definitions for the analytics assistant.
//!
//! Mounted at `/chat` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Chat routes.
///
/// ```text
/// POST / -> chat
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(chat::chat))
}
