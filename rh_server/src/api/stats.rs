//! Statistics API handler.

use axum::{Json, extract::State, http::StatusCode};
use riddle_hunt::stats::StatisticsEntry;
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub entries: Vec<StatisticsEntry>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Live progress of all players across all games. Public.
///
/// `elapsed_seconds` is recomputed on every call; it grows for entries in
/// progress and is frozen for finished ones.
pub async fn statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.stats_manager.all_entries().await {
        Ok(entries) => Ok(Json(StatisticsResponse { entries })),
        Err(e) => {
            tracing::error!(error = %e, "Statistics aggregation failed on storage");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.client_message(),
                }),
            ))
        }
    }
}
