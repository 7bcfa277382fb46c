//! Tradepost Backend Server
//!
//! The main Rust backend server for Tradepost, a peer-to-peer trading
//! marketplace: users list products for trade, other users submit competing
//! offers, and completed trades feed evaluations and reputation statistics.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use tradepost_server::config::Config;
use tradepost_server::db;
use tradepost_server::evaluation::EvaluationService;
use tradepost_server::middleware;
use tradepost_server::offer::OfferService;
use tradepost_server::routes;
use tradepost_server::services::StatsService;
use tradepost_server::state::AppState;
use tradepost_server::trade::TradeService;
use tradepost_server::users::UserService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .init();

    tracing::info!(
        environment = %config.environment.as_str(),
        "Starting Tradepost server"
    );

    // Initialize database connection pool and bring the schema up to date
    let db_pool = db::create_pool(&config).await?;
    db::run_migrations(&db_pool).await?;

    // Initialize services
    let user_service = Arc::new(UserService::new(
        db_pool.clone(),
        config.jwt_secret.clone(),
        config.jwt_access_token_ttl_seconds,
    ));
    let trade_service = Arc::new(TradeService::new(db_pool.clone()));
    let offer_service = Arc::new(OfferService::new(db_pool.clone()));
    let evaluation_service = Arc::new(EvaluationService::new(db_pool.clone()));
    let stats_service = Arc::new(StatsService::new(db_pool.clone()));

    // Create shared app state
    let app_state = AppState::new(
        user_service,
        trade_service,
        offer_service,
        evaluation_service,
        stats_service,
    );

    // Clone db_pool for health check
    let health_db_pool = db_pool.clone();

    // Create the app router
    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(move || health_check(health_db_pool.clone())))
        .merge(routes::user_routes())
        .merge(routes::trade_routes())
        .merge(routes::offer_routes())
        .merge(routes::evaluation_routes())
        .with_state(app_state)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(configure_cors(&config));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

async fn root() -> &'static str {
    "Tradepost API Server"
}

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: String,
    database: String,
    version: String,
}

/// Health check endpoint
async fn health_check(pool: sqlx::PgPool) -> axum::Json<HealthResponse> {
    let db_status = match db::check_health(&pool).await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    let status = if db_status == "connected" {
        "healthy"
    } else {
        "unhealthy"
    };

    axum::Json(HealthResponse {
        status: status.to_string(),
        database: db_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn configure_cors(config: &Config) -> CorsLayer {
    let allowed_origins_str = config.cors_allowed_origins.clone().unwrap_or_default();

    if allowed_origins_str.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins_str
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
