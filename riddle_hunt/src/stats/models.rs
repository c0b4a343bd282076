//! Statistics data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scoreboard line: a progress entry joined with its user and game
///
/// `elapsed_seconds` is computed at read time, so it keeps growing for
/// unfinished entries and freezes at `time_end - time_begin` once the
/// entry finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsEntry {
    pub username: String,
    pub game_title: String,
    pub current_riddle_index: i32,
    pub finished: bool,
    pub time_begin: DateTime<Utc>,
    pub elapsed_seconds: f64,
}
