//! Season reconstruction: seeding, brackets, consolation tiers, transaction
//! values and all-time records.
//!
//! Every function here is pure over an in-memory [`SeasonData`]; nothing is
//! cached and nothing touches the network or disk.

pub mod aggregate;
pub mod bracket;
pub mod consolation;
pub mod models;
pub mod season;
pub mod seeds;
pub mod transactions;

pub use aggregate::{aggregate_seasons, LeagueRecords, PickupRecord, TeamRecord};
pub use bracket::{
    resolve_bracket, resolve_championship, Bracket, BracketLayout, BracketNode, BracketSlot,
    BracketStatus,
};
pub use consolation::{partition_consolation, Consolation, LowerTier, MiddleTier};
pub use models::SeasonData;
pub use season::{summarize_season, PlayoffOutcome, Playoffs, SeasonSummary};
pub use seeds::{assign_seeds, Seed, SeedMap};
pub use transactions::{attribute, value_pickups, value_trades, Attribution, ValueAttribution};
