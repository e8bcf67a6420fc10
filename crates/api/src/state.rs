use std::sync::Arc;

use edualert_analysis::AnalysisClient;
use edualert_notify::EmailDelivery;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: edualert_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Analysis provider client; `None` when unconfigured (triage then
    /// fails open, chat reports the provider unavailable).
    pub analysis: Option<Arc<AnalysisClient>>,
    /// SMTP delivery; `None` when unconfigured (notifications are skipped).
    pub mailer: Option<Arc<EmailDelivery>>,
}
