//! Game content API handlers.
//!
//! Listing games is public; game details and riddle lists require a valid
//! access token; creation requires the admin claim.

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};
use riddle_hunt::auth::AccessClaims;
use riddle_hunt::game::{Game, GameError, NewGame, NewRiddle, Riddle};
use serde::{Deserialize, Serialize};

use super::AppState;

/// Uniform message for callers lacking the admin claim.
pub const ADMIN_REQUIRED: &str = "Admin privileges are required to perform this action";

#[derive(Debug, Deserialize)]
pub struct CreateGamePayload {
    pub title: String,
    pub description: String,
    pub riddle_count: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateRiddlePayload {
    pub sequence_no: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub radius: i32,
    pub dominant_object: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(err: &GameError) -> (StatusCode, Json<ErrorResponse>) {
    if let GameError::Database(db_err) = err {
        tracing::error!(error = %db_err, "Game operation failed on storage");
    }
    let status = match err {
        GameError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        GameError::GameNotFound(_) => StatusCode::NOT_FOUND,
        GameError::InvalidField(_) => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.client_message(),
        }),
    )
}

fn require_admin(claims: &AccessClaims) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    if claims.is_admin {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: ADMIN_REQUIRED.to_string(),
            }),
        ))
    }
}

/// List all games. Public.
pub async fn list_games(
    State(state): State<AppState>,
) -> Result<Json<Vec<Game>>, (StatusCode, Json<ErrorResponse>)> {
    match state.game_manager.list_games().await {
        Ok(games) => Ok(Json(games)),
        Err(e) => Err(error_response(&e)),
    }
}

/// Get one game's details.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid access token
/// - `404 Not Found`: Game doesn't exist
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<Game>, (StatusCode, Json<ErrorResponse>)> {
    match state.game_manager.get_game(game_id).await {
        Ok(game) => Ok(Json(game)),
        Err(e) => Err(error_response(&e)),
    }
}

/// List a game's riddles in play order.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid access token
/// - `404 Not Found`: Game doesn't exist
pub async fn list_riddles(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<Vec<Riddle>>, (StatusCode, Json<ErrorResponse>)> {
    match state.game_manager.riddles_for_game(game_id).await {
        Ok(riddles) => Ok(Json(riddles)),
        Err(e) => Err(error_response(&e)),
    }
}

/// Create a new game. Admin only.
///
/// # Errors
///
/// - `400 Bad Request`: Blank fields or non-positive riddle count
/// - `401 Unauthorized`: Caller lacks the admin claim
pub async fn create_game(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Json(payload): Json<CreateGamePayload>,
) -> Result<(StatusCode, Json<Game>), (StatusCode, Json<ErrorResponse>)> {
    require_admin(&claims)?;

    let request = NewGame {
        title: payload.title,
        description: payload.description,
        riddle_count: payload.riddle_count,
    };

    match state.game_manager.create_game(request).await {
        Ok(game) => Ok((StatusCode::CREATED, Json(game))),
        Err(e) => Err(error_response(&e)),
    }
}

/// Create a new riddle in a game. Admin only.
///
/// # Errors
///
/// - `400 Bad Request`: Out-of-range coordinates or radius
/// - `401 Unauthorized`: Caller lacks the admin claim
/// - `404 Not Found`: Game doesn't exist
pub async fn create_riddle(
    State(state): State<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Path(game_id): Path<i64>,
    Json(payload): Json<CreateRiddlePayload>,
) -> Result<(StatusCode, Json<Riddle>), (StatusCode, Json<ErrorResponse>)> {
    require_admin(&claims)?;

    let request = NewRiddle {
        sequence_no: payload.sequence_no,
        latitude: payload.latitude,
        longitude: payload.longitude,
        description: payload.description,
        radius: payload.radius,
        dominant_object: payload.dominant_object,
    };

    match state.game_manager.create_riddle(game_id, request).await {
        Ok(riddle) => Ok((StatusCode::CREATED, Json(riddle))),
        Err(e) => Err(error_response(&e)),
    }
}
