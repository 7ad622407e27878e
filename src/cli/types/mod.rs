//! Type-safe wrappers for league, roster, player and calendar values.

pub mod ids;
pub mod time;

pub use ids::{LeagueId, PlayerId, RosterId};
pub use time::{Season, Week};
