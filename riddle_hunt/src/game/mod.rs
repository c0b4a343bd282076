//! Game content module: games and their ordered riddles.
//!
//! Games and riddles are created by admins and immutable thereafter. A
//! game's `riddle_count` bounds every player's progress through it.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{GameError, GameResult};
pub use manager::GameManager;
pub use models::{Game, GameId, NewGame, NewRiddle, Riddle};
