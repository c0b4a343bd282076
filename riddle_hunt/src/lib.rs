//! # Riddle Hunt
//!
//! Backend library for a location-based scavenger-hunt game. Players
//! register, authenticate, join games composed of ordered riddles, and
//! advance through them; admins create games and riddles; a statistics
//! projection aggregates live progress across all players.
//!
//! ## Architecture
//!
//! Each domain is a `{errors, manager, models}` module backed by a shared
//! PostgreSQL pool:
//!
//! - [`auth`]: credential lifecycle — registration, login, JWT access and
//!   refresh tokens, and a `jti` revocation list that gates refresh
//! - [`game`]: admin-created games and their ordered riddles
//! - [`progress`]: the per-(user, game) state machine — idempotent join,
//!   monotone advancement, absorbing `finished` state
//! - [`stats`]: read-only scoreboard projection with live elapsed time
//! - [`db`]: connection pooling and database configuration
//!
//! The progress state machine is the concurrency-sensitive core: joins
//! rely on a store-level uniqueness constraint and advancement runs under
//! a per-entry row lock, so duplicate or racing requests can never fork or
//! rewind a player's progress.

/// Credential lifecycle: registration, login, token issue/refresh/revoke.
pub mod auth;

/// Database connection pooling and configuration.
pub mod db;

/// Admin-created game content: games and ordered riddles.
pub mod game;

/// Per-(user, game) progress state machine.
pub mod progress;

/// Live scoreboard aggregation.
pub mod stats;

pub use auth::{AuthManager, TokenIssuer};
pub use db::{Database, DatabaseConfig};
pub use game::GameManager;
pub use progress::ProgressManager;
pub use stats::StatsManager;
