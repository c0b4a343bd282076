//! Progress tracker implementation.

use super::{
    errors::{ProgressError, ProgressResult},
    models::{Advancement, ProgressEntry, advancement},
};
use crate::auth::UserId;
use crate::game::GameId;
use log::debug;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::sync::Arc;

/// Progress tracker
///
/// One authoritative row per (user, game), mutated only inside a
/// transaction holding the row lock; the read state never crosses two
/// separate calls.
#[derive(Clone)]
pub struct ProgressManager {
    pool: Arc<PgPool>,
}

impl ProgressManager {
    /// Create a new progress tracker
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Join a game, creating the progress entry on first join
    ///
    /// Idempotent: a repeated join returns the existing entry unchanged and
    /// never resets progress. Concurrent first joins collapse to a single
    /// row through the store's UNIQUE(user_id, game_id) constraint, not an
    /// existence check.
    ///
    /// # Errors
    ///
    /// * `ProgressError::GameNotFound` - No game with the given id
    pub async fn join_game(&self, user_id: UserId, game_id: GameId) -> ProgressResult<ProgressEntry> {
        let game = sqlx::query("SELECT id FROM games WHERE id = $1")
            .bind(game_id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        if game.is_none() {
            return Err(ProgressError::GameNotFound(game_id));
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO progress_entries (user_id, game_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, game_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(game_id)
        .execute(self.pool.as_ref())
        .await?;

        if inserted.rows_affected() > 0 {
            debug!("User {user_id} joined game {game_id}");
        }

        self.get_by_user_and_game(user_id, game_id).await
    }

    /// Advance a player's progress by one riddle
    ///
    /// Runs in a transaction holding `FOR UPDATE` on the entry row, so
    /// concurrent calls for the same (user, game) serialize and no
    /// increment is lost. A call on a finished entry is a no-op returning
    /// the entry unchanged.
    ///
    /// # Errors
    ///
    /// * `ProgressError::EntryNotFound` - User never joined this game
    pub async fn advance(&self, user_id: UserId, game_id: GameId) -> ProgressResult<ProgressEntry> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            SELECT p.id, p.user_id, p.game_id, p.current_riddle_index, p.finished,
                   p.time_begin, p.time_end, g.riddle_count
            FROM progress_entries p
            JOIN games g ON g.id = p.game_id
            WHERE p.user_id = $1 AND p.game_id = $2
            FOR UPDATE OF p
            "#,
        )
        .bind(user_id)
        .bind(game_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ProgressError::EntryNotFound { user_id, game_id })?;

        let entry = row_to_entry(&row);
        let riddle_count: i32 = row.get("riddle_count");

        let entry = match advancement(entry.current_riddle_index, riddle_count, entry.finished) {
            Advancement::AlreadyFinished => entry,
            Advancement::Step { next_index } => {
                let row = sqlx::query(
                    r#"
                    UPDATE progress_entries
                    SET current_riddle_index = $1
                    WHERE id = $2
                    RETURNING id, user_id, game_id, current_riddle_index, finished, time_begin, time_end
                    "#,
                )
                .bind(next_index)
                .bind(entry.id)
                .fetch_one(&mut *tx)
                .await?;
                row_to_entry(&row)
            }
            Advancement::Finish => {
                let row = sqlx::query(
                    r#"
                    UPDATE progress_entries
                    SET finished = TRUE, time_end = NOW()
                    WHERE id = $1
                    RETURNING id, user_id, game_id, current_riddle_index, finished, time_begin, time_end
                    "#,
                )
                .bind(entry.id)
                .fetch_one(&mut *tx)
                .await?;
                debug!("User {user_id} finished game {game_id}");
                row_to_entry(&row)
            }
        };

        tx.commit().await?;

        Ok(entry)
    }

    /// Get all progress entries for a user
    pub async fn get_by_user(&self, user_id: UserId) -> ProgressResult<Vec<ProgressEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, game_id, current_riddle_index, finished, time_begin, time_end
            FROM progress_entries
            WHERE user_id = $1
            ORDER BY time_begin
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(row_to_entry).collect())
    }

    /// Get a user's progress entry in one game
    ///
    /// # Errors
    ///
    /// * `ProgressError::EntryNotFound` - User never joined this game
    pub async fn get_by_user_and_game(
        &self,
        user_id: UserId,
        game_id: GameId,
    ) -> ProgressResult<ProgressEntry> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, game_id, current_riddle_index, finished, time_begin, time_end
            FROM progress_entries
            WHERE user_id = $1 AND game_id = $2
            "#,
        )
        .bind(user_id)
        .bind(game_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(ProgressError::EntryNotFound { user_id, game_id })?;

        Ok(row_to_entry(&row))
    }
}

fn row_to_entry(row: &PgRow) -> ProgressEntry {
    ProgressEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        game_id: row.get("game_id"),
        current_riddle_index: row.get("current_riddle_index"),
        finished: row.get("finished"),
        time_begin: row.get::<chrono::NaiveDateTime, _>("time_begin").and_utc(),
        time_end: row
            .get::<Option<chrono::NaiveDateTime>, _>("time_end")
            .map(|dt| dt.and_utc()),
    }
}
