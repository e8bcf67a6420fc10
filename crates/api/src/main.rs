use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edualert_analysis::{AnalysisClient, AnalysisConfig};
use edualert_api::config::ServerConfig;
use edualert_api::router::build_app_router;
use edualert_api::state::AppState;
use edualert_notify::{EmailConfig, EmailDelivery};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edualert_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = edualert_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    edualert_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    edualert_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Analysis provider (optional) ---
    let analysis = match AnalysisConfig::from_env() {
        Some(analysis_config) => {
            tracing::info!(model = %analysis_config.model, "Analysis provider configured");
            Some(Arc::new(AnalysisClient::new(analysis_config)))
        }
        None => {
            tracing::warn!("ANALYSIS_API_KEY not set; triage will fail open");
            None
        }
    };

    // --- Email delivery (optional) ---
    let mailer = match EmailConfig::from_env() {
        Some(email_config) => {
            tracing::info!(host = %email_config.smtp_host, "Email delivery configured");
            Some(Arc::new(EmailDelivery::new(email_config)))
        }
        None => {
            tracing::warn!("SMTP_HOST not set; notification emails will be skipped");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        analysis,
        mailer,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
