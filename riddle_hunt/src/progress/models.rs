//! Progress tracking data models and the advancement transition rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::UserId;
use crate::game::GameId;

/// Per-(user, game) progress record
///
/// At most one entry exists per (user, game) pair; the store enforces the
/// uniqueness. `time_end` is set exactly once, at the transition into
/// `finished`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub id: i64,
    pub user_id: UserId,
    pub game_id: GameId,
    pub current_riddle_index: i32,
    pub finished: bool,
    pub time_begin: DateTime<Utc>,
    pub time_end: Option<DateTime<Utc>>,
}

/// Outcome of applying one advancement call to an entry's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advancement {
    /// Entry is finished; `finished` is an absorbing state and the call is
    /// a no-op.
    AlreadyFinished,
    /// Move on to the next riddle.
    Step { next_index: i32 },
    /// Past the last riddle: mark finished and stamp `time_end`, leaving
    /// the index unchanged.
    Finish,
}

/// Advancement transition rule.
///
/// Keeps `current_riddle_index` within `[0, riddle_count]`: the index walks
/// up by one per call until it reaches `riddle_count`, the call after that
/// finishes the entry, and every later call is absorbed.
pub fn advancement(current_riddle_index: i32, riddle_count: i32, finished: bool) -> Advancement {
    if finished {
        Advancement::AlreadyFinished
    } else if current_riddle_index + 1 > riddle_count {
        Advancement::Finish
    } else {
        Advancement::Step {
            next_index: current_riddle_index + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn walks_to_count_then_finishes_then_absorbs() {
        // riddle_count = 3: indexes 1,2,3 then finish then no-op.
        assert_eq!(advancement(0, 3, false), Advancement::Step { next_index: 1 });
        assert_eq!(advancement(1, 3, false), Advancement::Step { next_index: 2 });
        assert_eq!(advancement(2, 3, false), Advancement::Step { next_index: 3 });
        assert_eq!(advancement(3, 3, false), Advancement::Finish);
        assert_eq!(advancement(3, 3, true), Advancement::AlreadyFinished);
    }

    #[test]
    fn single_riddle_game() {
        assert_eq!(advancement(0, 1, false), Advancement::Step { next_index: 1 });
        assert_eq!(advancement(1, 1, false), Advancement::Finish);
        assert_eq!(advancement(1, 1, true), Advancement::AlreadyFinished);
    }

    proptest! {
        /// Driving a fresh entry through any number of calls keeps the
        /// index within bounds, monotone, and finishes exactly once.
        #[test]
        fn index_stays_bounded_and_finish_fires_once(
            riddle_count in 1i32..50,
            calls in 1usize..200,
        ) {
            let mut index = 0;
            let mut finished = false;
            let mut finish_transitions = 0;

            for _ in 0..calls {
                match advancement(index, riddle_count, finished) {
                    Advancement::AlreadyFinished => prop_assert!(finished),
                    Advancement::Step { next_index } => {
                        prop_assert_eq!(next_index, index + 1);
                        index = next_index;
                    }
                    Advancement::Finish => {
                        finished = true;
                        finish_transitions += 1;
                    }
                }
                prop_assert!(index >= 0 && index <= riddle_count);
            }

            prop_assert!(finish_transitions <= 1);
            if calls > riddle_count as usize {
                prop_assert!(finished);
                prop_assert_eq!(index, riddle_count);
            }
        }
    }
}
