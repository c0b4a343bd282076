//! Progress tracking module: the per-(user, game) state machine.
//!
//! States are `not_started` (no row), `in_progress`, and `finished`.
//! Joining is idempotent, advancement is monotone and serialized per
//! (user, game), and `finished` is an absorbing state.
//!
//! ## Example
//!
//! ```no_run
//! use riddle_hunt::db::Database;
//! use riddle_hunt::progress::ProgressManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let progress = ProgressManager::new(Arc::new(db.pool().clone()));
//!
//!     let entry = progress.join_game(1, 7).await?;
//!     assert_eq!(entry.current_riddle_index, 0);
//!
//!     let entry = progress.advance(1, 7).await?;
//!     println!("now at riddle {}", entry.current_riddle_index);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{ProgressError, ProgressResult};
pub use manager::ProgressManager;
pub use models::{Advancement, ProgressEntry, advancement};
