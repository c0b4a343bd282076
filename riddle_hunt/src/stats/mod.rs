//! Statistics module: live scoreboard over all players and games.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{StatsError, StatsResult};
pub use manager::StatsManager;
pub use models::StatisticsEntry;
