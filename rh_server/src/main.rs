//! Scavenger hunt game server.
//!
//! Serves the riddle hunt REST API with database-backed authentication,
//! game content, progress tracking, and live statistics.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;
use pico_args::Arguments;
use rh_server::api;
use rh_server::config::ServerConfig;
use rh_server::{logging, metrics};
use riddle_hunt::{
    AuthManager, Database, GameManager, ProgressManager, StatsManager,
};
use tracing::{error, info};

const HELP: &str = "\
Run a scavenger hunt game server

USAGE:
  rh_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:3000]
  --db-url     URL         Database connection string  [default: env DATABASE_URL]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  DATABASE_URL             PostgreSQL connection string
  JWT_SECRET               JWT signing secret (required)
  PASSWORD_PEPPER          Password hashing pepper (required)
  METRICS_BIND             Optional Prometheus exporter bind address
  REVOCATION_PRUNE_INTERVAL_SECS  Seconds between revocation-list pruning runs
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let database_url_override: Option<String> = pargs.opt_value_from_str("--db-url")?;

    logging::init();

    let config = ServerConfig::from_env(bind_override, database_url_override)
        .map_err(|e| anyhow::anyhow!("Configuration error: {e}"))?;

    info!("Starting scavenger hunt server at {}", config.bind);

    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {e}"))?;
    info!("Database connected successfully");

    let pool = Arc::new(db.pool().clone());
    let auth_manager = Arc::new(AuthManager::new(
        pool.clone(),
        config.security.password_pepper.clone(),
        config.security.jwt_secret.clone(),
    ));
    let game_manager = Arc::new(GameManager::new(pool.clone()));
    let progress_manager = Arc::new(ProgressManager::new(pool.clone()));
    let stats_manager = Arc::new(StatsManager::new(pool.clone()));

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus metrics exported on {addr}");
    }

    // Revocation entries only matter while their token is still alive;
    // prune the dead ones periodically.
    let prune_auth = auth_manager.clone();
    let prune_interval = Duration::from_secs(config.prune_interval_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(prune_interval);
        interval.tick().await; // immediate first tick
        loop {
            interval.tick().await;
            match prune_auth.prune_revoked().await {
                Ok(pruned) if pruned > 0 => {
                    info!("Pruned {pruned} expired revocation entries");
                }
                Ok(_) => {}
                Err(e) => error!("Revocation pruning failed: {e}"),
            }
        }
    });

    let api_state = api::AppState {
        auth_manager,
        game_manager,
        progress_manager,
        stats_manager,
        pool,
    };

    let app = api::create_router(api_state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {e}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {e}"))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
