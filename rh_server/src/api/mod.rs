//! HTTP API for the scavenger hunt server.
//!
//! # Architecture
//!
//! - **Axum**: Async web framework
//! - **Tower-http**: CORS middleware
//! - **JWT**: Token-based authentication with access/refresh tokens
//!
//! # Modules
//!
//! - [`auth`]: Credential lifecycle (register, login, refresh, logout)
//! - [`games`]: Game and riddle content (public reads, admin writes)
//! - [`progress`]: The caller's per-game progress (join, advance, reads)
//! - [`stats`]: Public live scoreboard
//! - [`middleware`]: Access-token middleware for protected endpoints
//! - [`request_id`]: Per-request correlation IDs
//!
//! # Endpoints
//!
//! ```text
//! GET  /health                          - Health check (public)
//! POST /api/v1/auth/register            - Register user (public)
//! POST /api/v1/auth/login               - Login (public)
//! POST /api/v1/auth/refresh             - New access token (refresh token in body)
//! POST /api/v1/auth/logout              - Revoke refresh token (refresh token in body)
//! GET  /api/v1/games                    - List games (public)
//! GET  /api/v1/games/{id}               - Game details (auth)
//! GET  /api/v1/games/{id}/riddles       - Game riddles (auth)
//! POST /api/v1/games                    - Create game (admin)
//! POST /api/v1/games/{id}/riddles       - Create riddle (admin)
//! POST /api/v1/games/{id}/join          - Join game (auth)
//! POST /api/v1/games/{id}/advance       - Advance one riddle (auth)
//! GET  /api/v1/progress                 - Caller's entries (auth)
//! GET  /api/v1/progress/{game_id}       - Caller's entry in one game (auth)
//! GET  /api/v1/statistics               - Live scoreboard (public)
//! ```
//!
//! # Security
//!
//! - Access tokens expire after 15 minutes and are verified statelessly
//! - Refresh tokens expire after 7 days and are revocable via logout
//! - Admin-only endpoints check the admin claim from the verified token
//!   and answer `401 Unauthorized` otherwise
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production, configure
//! appropriate origins, methods, and headers.

pub mod auth;
pub mod games;
pub mod middleware;
pub mod progress;
pub mod request_id;
pub mod stats;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use riddle_hunt::{AuthManager, GameManager, ProgressManager, StatsManager};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request (cheap, everything is behind an Arc).
#[derive(Clone)]
pub struct AppState {
    pub auth_manager: Arc<AuthManager>,
    pub game_manager: Arc<GameManager>,
    pub progress_manager: Arc<ProgressManager>,
    pub stats_manager: Arc<StatsManager>,
    pub pool: Arc<PgPool>,
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Example
///
/// ```rust,no_run
/// # use rh_server::api::{create_router, AppState};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let state: AppState = unimplemented!();
/// let app = create_router(state);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState) -> Router {
    let v1_routes = create_v1_router(state.clone());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", v1_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create API v1 router with all versioned endpoints.
fn create_v1_router(state: AppState) -> Router<AppState> {
    // Public routes (no access-token middleware). Refresh and logout
    // authenticate with the refresh token carried in the request body.
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/games", get(games::list_games))
        .route("/statistics", get(stats::statistics));

    // Protected routes (require a valid access token)
    let protected_routes = Router::new()
        .route("/games", post(games::create_game))
        .route("/games/{game_id}", get(games::get_game))
        .route("/games/{game_id}/riddles", get(games::list_riddles))
        .route("/games/{game_id}/riddles", post(games::create_riddle))
        .route("/games/{game_id}/join", post(progress::join_game))
        .route("/games/{game_id}/advance", post(progress::advance))
        .route("/progress", get(progress::my_progress))
        .route("/progress/{game_id}", get(progress::my_game_progress))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new().merge(public_routes).merge(protected_routes)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Probes database connectivity and returns `200 OK` when healthy,
/// `503 Service Unavailable` otherwise.
///
/// # Example
///
/// ```bash
/// curl http://localhost:3000/health
/// # {"status":"healthy","database":true,"timestamp":"2026-08-06T10:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = sqlx::query("SELECT 1")
        .fetch_one(&*state.pool)
        .await
        .is_ok();

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
