//! # server
//!
//! REST API server for hint-guided ridge prediction.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod routes;

use config::{ServerConfig, ServerError};
use routes::AppState;

/// Build the router with middleware
fn app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health", get(routes::health))
        .route("/health/live", get(routes::health))
        // API endpoints
        .route("/predict", post(routes::predict))
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::from_env()?;
    let pipeline = config.predictor.build_pipeline()?;
    let state = AppState::new(pipeline, config.predict_timeout);
    let addr = config.addr()?;

    tracing::info!(
        lambda = config.predictor.ridge_lambda,
        timeout_secs = config.predict_timeout.as_secs(),
        "server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,tower_http=info".into()),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("server failed: {}", e);
        std::process::exit(1);
    }
}
