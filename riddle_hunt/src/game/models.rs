//! Game content data models.

use serde::{Deserialize, Serialize};

/// Game ID type
pub type GameId = i64;

/// Game model
///
/// `riddle_count` is the number of riddles a player must pass through; a
/// player's progress index is bounded by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub description: String,
    pub riddle_count: i32,
}

/// Riddle model
///
/// Belongs to exactly one game; `sequence_no` defines the order a player
/// must follow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Riddle {
    pub id: i64,
    pub game_id: GameId,
    pub sequence_no: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub radius: i32,
    pub dominant_object: String,
}

/// Game creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGame {
    pub title: String,
    pub description: String,
    pub riddle_count: i32,
}

/// Riddle creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRiddle {
    pub sequence_no: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub radius: i32,
    pub dominant_object: String,
}
