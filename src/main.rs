//! Message board API server.
//!
//! This is the application entry point. It loads configuration from the
//! environment, initializes tracing, connects the Postgres pool, ensures the
//! message table exists, sets up the Axum router with the CORS gate, and
//! starts the HTTP server. Any startup failure logs an error and exits
//! non-zero rather than listening against a half-initialized store.

mod config;
mod cors;
mod db;
mod error;
mod http;
mod middleware;
mod routes;
mod state;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER};
use db::PgStore;
use routes::create_router;
use state::AppState;

/// JSON API over a Postgres-backed message store
#[derive(Parser, Debug)]
#[command(name = "message-board", version, about)]
struct Args {
    /// Log level filter (e.g., "message_board=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    // Load a local .env file if present; real deployments set the
    // environment directly
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Configuration is read before tracing is up; report failures on stderr
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter));
    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!(
        port = config.http.port,
        origins = ?config.cors.allowed_origins,
        "Loaded configuration"
    );
    tracing::info!(
        host = %config.db.host,
        port = config.db.port,
        database = %config.db.database,
        user = %config.db.user,
        tls = ?config.db.tls_mode,
        "Database configured"
    );

    // Construct the pool eagerly so an unreachable database fails startup
    let store = match PgStore::connect(&config.db).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to the database");
            std::process::exit(1);
        }
    };

    if let Err(e) = store.ensure_schema().await {
        tracing::error!(error = %e, "Failed to ensure message table");
        std::process::exit(1);
    }
    tracing::info!("Message table ready");

    // Create application state and router
    let state = AppState::new(config.clone(), Arc::new(store));
    let app = create_router(state);

    if let Err(e) = http::start_server(app, &config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
