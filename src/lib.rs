//! Fantasy League History Library
//!
//! Reconstructs the postseason and transaction history of a Sleeper fantasy
//! football league, season by season, and folds the seasons into all-time
//! records.
//!
//! ## Features
//!
//! - **Seeding**: Regular-season seeds from wins and points scored
//! - **Playoff Brackets**: 4 and 8 team championship brackets keyed by seed
//! - **Consolation Tiers**: The placement bracket and the toilet bowl, split
//!   out of one combined consolation feed
//! - **Transaction Values**: Points a pickup or trade produced for its new team
//! - **All-time Records**: Titles, playoff records and pickup leaderboards
//! - **Snapshots**: Each season is fetched once and stored as JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use league_history::{core::LeagueConfig, league::summarize_season, sleeper::*, Season};
//!
//! # async fn example() -> league_history::Result<()> {
//! let config = LeagueConfig::load(None)?;
//! let season = Season::new(2023);
//! let league_id = config.league_id(season)?;
//!
//! let data = load_or_fetch_season(season, &league_id, &config, &FetchOptions::default()).await?;
//! let summary = summarize_season(&data, &config);
//! println!("{:?}", summary.playoffs.completed().and_then(|p| p.champion.clone()));
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at a league config instead of passing `--config` every time:
//! ```bash
//! export LEAGUE_HISTORY_CONFIG=~/leagues/home-league.json
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod league;
pub mod sleeper;

// Re-export commonly used types
pub use cli::types::{LeagueId, PlayerId, RosterId, Season, Week};
pub use error::{LeagueError, Result};
pub use league::models::SeasonData;

pub const CONFIG_ENV_VAR: &str = "LEAGUE_HISTORY_CONFIG";
