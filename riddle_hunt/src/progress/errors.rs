//! Progress tracking error types.

use thiserror::Error;

/// Progress tracking errors
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Game not found
    #[error("Game {0} not found")]
    GameNotFound(i64),

    /// No progress entry for this (user, game) pair
    #[error("User {user_id} has no progress in game {game_id}")]
    EntryNotFound { user_id: i64, game_id: i64 },
}

impl ProgressError {
    /// Get a client-safe error message that doesn't leak internal detail
    pub fn client_message(&self) -> String {
        match self {
            ProgressError::Database(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for progress operations
pub type ProgressResult<T> = Result<T, ProgressError>;
