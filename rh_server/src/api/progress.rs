//! Progress API handlers.
//!
//! All endpoints act on the authenticated caller's own progress, resolved
//! from the verified access claims — a caller can never address another
//! player's entries.

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};
use riddle_hunt::auth::AccessClaims;
use riddle_hunt::progress::{ProgressEntry, ProgressError};
use serde::Serialize;

use super::AppState;
use crate::metrics;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(err: &ProgressError) -> (StatusCode, Json<ErrorResponse>) {
    if let ProgressError::Database(db_err) = err {
        tracing::error!(error = %db_err, "Progress operation failed on storage");
    }
    let status = match err {
        ProgressError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ProgressError::GameNotFound(_) | ProgressError::EntryNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.client_message(),
        }),
    )
}

/// Join a game.
///
/// Idempotent: joining a game the caller already plays returns the
/// existing entry unchanged.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid access token
/// - `404 Not Found`: Game doesn't exist
pub async fn join_game(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Path(game_id): Path<i64>,
) -> Result<Json<ProgressEntry>, (StatusCode, Json<ErrorResponse>)> {
    match state.progress_manager.join_game(claims.sub, game_id).await {
        Ok(entry) => {
            metrics::games_joined_total();
            Ok(Json(entry))
        }
        Err(e) => Err(error_response(&e)),
    }
}

/// Advance to the next riddle.
///
/// Finishing the game sets `finished` and stamps `time_end`; further calls
/// are no-ops returning the finished entry.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid access token
/// - `404 Not Found`: Caller never joined this game
pub async fn advance(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Path(game_id): Path<i64>,
) -> Result<Json<ProgressEntry>, (StatusCode, Json<ErrorResponse>)> {
    match state.progress_manager.advance(claims.sub, game_id).await {
        Ok(entry) => {
            metrics::riddles_advanced_total();
            Ok(Json(entry))
        }
        Err(e) => Err(error_response(&e)),
    }
}

/// The caller's progress across all joined games.
pub async fn my_progress(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
) -> Result<Json<Vec<ProgressEntry>>, (StatusCode, Json<ErrorResponse>)> {
    match state.progress_manager.get_by_user(claims.sub).await {
        Ok(entries) => Ok(Json(entries)),
        Err(e) => Err(error_response(&e)),
    }
}

/// The caller's progress in one game.
///
/// # Errors
///
/// - `404 Not Found`: Caller never joined this game
pub async fn my_game_progress(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Path(game_id): Path<i64>,
) -> Result<Json<ProgressEntry>, (StatusCode, Json<ErrorResponse>)> {
    match state
        .progress_manager
        .get_by_user_and_game(claims.sub, game_id)
        .await
    {
        Ok(entry) => Ok(Json(entry)),
        Err(e) => Err(error_response(&e)),
    }
}
