//! Statistics aggregator implementation.

use super::{
    errors::StatsResult,
    models::StatisticsEntry,
};
use chrono::Utc;
use sqlx::{PgPool, Row};
use std::sync::Arc;

/// Statistics aggregator
///
/// Read-only projection over every progress entry joined with user and
/// game identity. Results are recomputed on every call, never cached.
#[derive(Clone)]
pub struct StatsManager {
    pool: Arc<PgPool>,
}

impl StatsManager {
    /// Create a new statistics aggregator
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// All progress entries across all players and games
    ///
    /// `elapsed_seconds` is `(time_end or now) - time_begin`, evaluated at
    /// read time against a single `now` for the whole result set.
    pub async fn all_entries(&self) -> StatsResult<Vec<StatisticsEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT u.username, g.title AS game_title,
                   p.current_riddle_index, p.finished, p.time_begin, p.time_end
            FROM progress_entries p
            JOIN users u ON u.id = p.user_id
            JOIN games g ON g.id = p.game_id
            ORDER BY p.time_begin
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        let now = Utc::now();
        let entries = rows
            .into_iter()
            .map(|row| {
                let time_begin = row.get::<chrono::NaiveDateTime, _>("time_begin").and_utc();
                let time_end = row
                    .get::<Option<chrono::NaiveDateTime>, _>("time_end")
                    .map(|dt| dt.and_utc());

                let elapsed = time_end.unwrap_or(now) - time_begin;

                StatisticsEntry {
                    username: row.get("username"),
                    game_title: row.get("game_title"),
                    current_riddle_index: row.get("current_riddle_index"),
                    finished: row.get("finished"),
                    time_begin,
                    elapsed_seconds: elapsed.num_milliseconds() as f64 / 1000.0,
                }
            })
            .collect();

        Ok(entries)
    }
}
