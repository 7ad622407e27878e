//! Raw Sleeper API payloads.
//!
//! These mirror the JSON the API returns and are only used by the adapter;
//! the rest of the crate works with [`crate::league::models`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLeague {
    pub league_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub settings: RawLeagueSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLeagueSettings {
    #[serde(default)]
    pub playoff_teams: Option<u32>,
    #[serde(default)]
    pub playoff_week_start: Option<u16>,
    #[serde(default)]
    pub last_scored_leg: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawUser {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRoster {
    pub roster_id: u32,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub settings: RawRosterSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRosterSettings {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    #[serde(default)]
    pub fpts: u32,
    /// Hundredths of a point.
    #[serde(default)]
    pub fpts_decimal: u32,
}

impl RawRosterSettings {
    pub fn points_for(&self) -> f64 {
        f64::from(self.fpts) + f64::from(self.fpts_decimal) / 100.0
    }
}

/// One roster's row in `/matchups/{week}`; two rows share a `matchup_id`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawMatchup {
    pub roster_id: u32,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub starters: Option<Vec<String>>,
    #[serde(default)]
    pub players: Option<Vec<String>>,
    #[serde(default)]
    pub players_points: Option<BTreeMap<String, f64>>,
}

/// Row of `/winners_bracket` or `/losers_bracket`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawBracketMatchup {
    /// Round
    pub r: u8,
    /// Matchup id
    #[serde(default)]
    pub m: Option<u32>,
    #[serde(default)]
    pub t1: Option<u32>,
    #[serde(default)]
    pub t2: Option<u32>,
    /// Winner roster
    #[serde(default)]
    pub w: Option<u32>,
    /// Loser roster
    #[serde(default)]
    pub l: Option<u32>,
    /// Placement decided by this game
    #[serde(default)]
    pub p: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTransaction {
    pub transaction_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: String,
    /// Week the transaction was processed in.
    #[serde(default)]
    pub leg: Option<u16>,
    #[serde(default)]
    pub adds: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub drops: Option<BTreeMap<String, u32>>,
    /// Every roster involved, including pick-only or budget-only parties.
    #[serde(default)]
    pub roster_ids: Option<Vec<u32>>,
    #[serde(default)]
    pub settings: Option<RawTransactionSettings>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTransactionSettings {
    #[serde(default)]
    pub waiver_bid: Option<u32>,
}

/// Entry of `/players/nfl`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawPlayer {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl RawPlayer {
    /// `full_name`, else "first last".
    pub fn display_name(&self) -> Option<String> {
        if let Some(full) = self.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return Some(full.to_string());
        }
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let joined = joined.trim();
        (!joined.is_empty()).then(|| joined.to_string())
    }
}

/// Everything fetched for one season before conversion.
#[derive(Debug, Clone, Default)]
pub struct RawSeason {
    pub league: RawLeague,
    pub users: Vec<RawUser>,
    pub rosters: Vec<RawRoster>,
    /// `(week, rows)` for every week that could be fetched.
    pub matchups: Vec<(u16, Vec<RawMatchup>)>,
    pub winners_bracket: Vec<RawBracketMatchup>,
    pub losers_bracket: Vec<RawBracketMatchup>,
    /// `(week, rows)`; `leg` is used when present, otherwise the week.
    pub transactions: Vec<(u16, Vec<RawTransaction>)>,
    pub players: Option<BTreeMap<String, RawPlayer>>,
}
