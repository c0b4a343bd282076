//! Game content error types.

use thiserror::Error;

/// Game content errors
#[derive(Debug, Error)]
pub enum GameError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Game not found
    #[error("Game {0} not found")]
    GameNotFound(i64),

    /// Invalid game or riddle field
    #[error("Invalid field: {0}")]
    InvalidField(String),
}

impl GameError {
    /// Get a client-safe error message that doesn't leak internal detail
    pub fn client_message(&self) -> String {
        match self {
            GameError::Database(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for game content operations
pub type GameResult<T> = Result<T, GameError>;
