//! Data Analysis API Server
//!
//! A small HTTP service that computes descriptive statistics for a list of
//! numbers. Provides REST API endpoints for:
//!
//! - Dataset analysis (mean, median, mode, variance, quartiles, outliers,
//!   histogram)
//! - Dataset quality scoring
//! - Retrieval of the most recent analysis
//!
//! ## Architecture
//!
//! All computation lives in `stats-core`; this binary only validates
//! requests, calls the core and serializes results. The most recent analysis
//! is kept in memory for the lifetime of the process.

use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{
    handle_analyze, handle_health, handle_info, handle_score, handle_summary, AppState,
};

/// Command-line arguments for the data analysis server
#[derive(Parser, Debug)]
#[command(name = "stats-api")]
#[command(about = "HTTP API for descriptive statistics and dataset quality scoring")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "5001")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Metadata
        .route("/", get(handle_info))
        .route("/health", get(handle_health))
        // Statistics endpoints
        .route("/stats/summary", get(handle_summary))
        .route("/stats/analyze", post(handle_analyze))
        .route("/stats/score", post(handle_score))
        // Apply middleware; samples have no size limit
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive(log_level.into())
                .add_directive("tower_http=debug".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting data analysis API on {}:{}", args.host, args.port);

    let app = router(AppState::default());

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
