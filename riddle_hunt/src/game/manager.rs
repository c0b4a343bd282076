//! Game content manager implementation.

use super::{
    errors::{GameError, GameResult},
    models::{Game, GameId, NewGame, NewRiddle, Riddle},
};
use log::info;
use sqlx::{PgPool, Row};
use std::sync::Arc;

/// Game content manager
///
/// Creation is admin-only; the caller is expected to have evaluated the
/// admin predicate against verified token claims before calling in.
#[derive(Clone)]
pub struct GameManager {
    pool: Arc<PgPool>,
}

impl GameManager {
    /// Create a new game content manager
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Create a new game
    ///
    /// # Errors
    ///
    /// * `GameError::InvalidField` - Blank title/description or non-positive
    ///   riddle count
    pub async fn create_game(&self, request: NewGame) -> GameResult<Game> {
        if request.title.trim().is_empty() {
            return Err(GameError::InvalidField("title cannot be blank".to_string()));
        }
        if request.description.trim().is_empty() {
            return Err(GameError::InvalidField(
                "description cannot be blank".to_string(),
            ));
        }
        if request.riddle_count <= 0 {
            return Err(GameError::InvalidField(
                "riddle_count must be positive".to_string(),
            ));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO games (title, description, riddle_count)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, riddle_count
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.riddle_count)
        .fetch_one(self.pool.as_ref())
        .await?;

        let game = row_to_game(&row);
        info!("Created game {} ({})", game.id, game.title);

        Ok(game)
    }

    /// Create a new riddle in an existing game
    ///
    /// # Errors
    ///
    /// * `GameError::GameNotFound` - No game with the given id
    /// * `GameError::InvalidField` - Out-of-range coordinates or radius
    pub async fn create_riddle(&self, game_id: GameId, request: NewRiddle) -> GameResult<Riddle> {
        if !(-90.0..=90.0).contains(&request.latitude) {
            return Err(GameError::InvalidField(
                "latitude must be within [-90, 90]".to_string(),
            ));
        }
        if !(-180.0..=180.0).contains(&request.longitude) {
            return Err(GameError::InvalidField(
                "longitude must be within [-180, 180]".to_string(),
            ));
        }
        if request.radius <= 0 {
            return Err(GameError::InvalidField(
                "radius must be positive".to_string(),
            ));
        }
        if request.description.trim().is_empty() {
            return Err(GameError::InvalidField(
                "description cannot be blank".to_string(),
            ));
        }

        // Riddles must hang off an existing game.
        self.get_game(game_id).await?;

        let row = sqlx::query(
            r#"
            INSERT INTO riddles (game_id, sequence_no, latitude, longitude, description, radius, dominant_object)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, game_id, sequence_no, latitude, longitude, description, radius, dominant_object
            "#,
        )
        .bind(game_id)
        .bind(request.sequence_no)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(&request.description)
        .bind(request.radius)
        .bind(&request.dominant_object)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row_to_riddle(&row))
    }

    /// List all games
    pub async fn list_games(&self) -> GameResult<Vec<Game>> {
        let rows = sqlx::query(
            "SELECT id, title, description, riddle_count FROM games ORDER BY id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(row_to_game).collect())
    }

    /// Get a game by id
    ///
    /// # Errors
    ///
    /// * `GameError::GameNotFound` - No game with the given id
    pub async fn get_game(&self, game_id: GameId) -> GameResult<Game> {
        let row = sqlx::query(
            "SELECT id, title, description, riddle_count FROM games WHERE id = $1",
        )
        .bind(game_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(GameError::GameNotFound(game_id))?;

        Ok(row_to_game(&row))
    }

    /// List a game's riddles in play order
    ///
    /// # Errors
    ///
    /// * `GameError::GameNotFound` - No game with the given id
    pub async fn riddles_for_game(&self, game_id: GameId) -> GameResult<Vec<Riddle>> {
        self.get_game(game_id).await?;

        let rows = sqlx::query(
            r#"
            SELECT id, game_id, sequence_no, latitude, longitude, description, radius, dominant_object
            FROM riddles
            WHERE game_id = $1
            ORDER BY sequence_no
            "#,
        )
        .bind(game_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(row_to_riddle).collect())
    }
}

fn row_to_game(row: &sqlx::postgres::PgRow) -> Game {
    Game {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        riddle_count: row.get("riddle_count"),
    }
}

fn row_to_riddle(row: &sqlx::postgres::PgRow) -> Riddle {
    Riddle {
        id: row.get("id"),
        game_id: row.get("game_id"),
        sequence_no: row.get("sequence_no"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        description: row.get("description"),
        radius: row.get("radius"),
        dominant_object: row.get("dominant_object"),
    }
}
