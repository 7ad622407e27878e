//! Season data model consumed by the seeding, bracket and transaction logic.
//!
//! Everything here is an immutable snapshot of one season as delivered by the
//! data adapter. Derived structures (seeds, brackets, attributions) are
//! computed from it on demand and never written back.

use crate::cli::types::{LeagueId, PlayerId, RosterId, Season, Week};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One team's regular-season line for a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub roster_id: RosterId,
    #[serde(default)]
    pub owner_id: Option<String>,
    pub team_name: String,
    pub season: Season,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    pub points_for: f64,
}

/// A roster's lineup and scoring for a single week.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineupSnapshot {
    pub roster_id: RosterId,
    pub points: f64,
    #[serde(default)]
    pub starters: Vec<PlayerId>,
    #[serde(default)]
    pub players_points: BTreeMap<PlayerId, f64>,
}

impl LineupSnapshot {
    pub fn started(&self, player_id: &PlayerId) -> bool {
        self.starters.iter().any(|p| p == player_id)
    }

    pub fn points_for(&self, player_id: &PlayerId) -> Option<f64> {
        self.players_points.get(player_id).copied()
    }
}

/// A regular-season (or playoff-week) head-to-head game.
///
/// `away` is `None` for a bye week: the roster still has a lineup snapshot but
/// no opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    pub season: Season,
    pub week: Week,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    pub home: LineupSnapshot,
    #[serde(default)]
    pub away: Option<LineupSnapshot>,
}

impl MatchupRecord {
    pub fn sides(&self) -> impl Iterator<Item = &LineupSnapshot> {
        std::iter::once(&self.home).chain(self.away.iter())
    }

    /// Higher score wins; ties and byes have no winner.
    pub fn winner(&self) -> Option<RosterId> {
        let away = self.away.as_ref()?;
        if self.home.points > away.points {
            Some(self.home.roster_id)
        } else if away.points > self.home.points {
            Some(away.roster_id)
        } else {
            None
        }
    }
}

/// A raw playoff-bracket row, as flat and denormalized as the source sends it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BracketRecord {
    pub round: u8,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default)]
    pub team1: Option<RosterId>,
    #[serde(default)]
    pub team2: Option<RosterId>,
    #[serde(default)]
    pub winner: Option<RosterId>,
    #[serde(default)]
    pub loser: Option<RosterId>,
    /// Final placement this game decides, when the source says so.
    #[serde(default)]
    pub placement: Option<u8>,
}

impl BracketRecord {
    pub fn participants(&self) -> impl Iterator<Item = RosterId> {
        self.team1.into_iter().chain(self.team2)
    }

    pub fn involves(&self, roster_id: RosterId) -> bool {
        self.team1 == Some(roster_id) || self.team2 == Some(roster_id)
    }
}

/// Transaction type as reported by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Trade,
    Waiver,
    FreeAgent,
    Commissioner,
}

/// Reporting bucket for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TransactionClass {
    /// Players swapped between rosters
    Trade,
    /// Waiver claim with a non-zero bid
    Waiver,
    /// Free-agent add (or zero-bid waiver / commissioner move)
    FreeAgent,
}

/// A completed roster transaction. `adds` and `drops` map player → roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub season: Season,
    pub week: Week,
    pub kind: TransactionKind,
    #[serde(default)]
    pub adds: BTreeMap<PlayerId, RosterId>,
    #[serde(default)]
    pub drops: BTreeMap<PlayerId, RosterId>,
    #[serde(default)]
    pub waiver_bid: Option<u32>,
    /// Every roster party to the move, including ones that only sent picks
    /// or budget.
    #[serde(default)]
    pub roster_ids: Vec<RosterId>,
}

impl Transaction {
    pub fn class(&self) -> TransactionClass {
        match self.kind {
            TransactionKind::Trade => TransactionClass::Trade,
            TransactionKind::Waiver if self.waiver_bid.unwrap_or(0) > 0 => {
                TransactionClass::Waiver
            }
            _ => TransactionClass::FreeAgent,
        }
    }

    /// The roster that made the move: the receiver of the first add, or the
    /// owner of the first drop for a drop-only transaction.
    pub fn roster_id(&self) -> Option<RosterId> {
        self.adds
            .values()
            .next()
            .or_else(|| self.drops.values().next())
            .copied()
    }

    pub fn dropped_player_id(&self) -> Option<&PlayerId> {
        self.drops.keys().next()
    }

    /// Every roster touched by this transaction.
    pub fn rosters(&self) -> BTreeSet<RosterId> {
        self.adds
            .values()
            .chain(self.drops.values())
            .chain(self.roster_ids.iter())
            .copied()
            .collect()
    }
}

/// Catalog entry for a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub player_id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
}

/// Player lookup table for one season.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerCatalog {
    players: BTreeMap<PlayerId, PlayerInfo>,
}

impl PlayerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: PlayerInfo) {
        self.players.insert(info.player_id.clone(), info);
    }

    /// Add a placeholder entry unless the player is already known.
    pub fn ensure(&mut self, player_id: &PlayerId) {
        if !self.players.contains_key(player_id) {
            self.insert(PlayerInfo {
                player_id: player_id.clone(),
                name: format!("Player {}", player_id),
                position: None,
            });
        }
    }

    /// Look a player up. Team defenses always resolve.
    pub fn resolve(&self, player_id: &PlayerId) -> Option<PlayerInfo> {
        if let Some(info) = self.players.get(player_id) {
            return Some(info.clone());
        }
        player_id.is_team_defense().then(|| PlayerInfo {
            player_id: player_id.clone(),
            name: format!("{} DST", player_id),
            position: Some("DEF".to_string()),
        })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl FromIterator<PlayerInfo> for PlayerCatalog {
    fn from_iter<I: IntoIterator<Item = PlayerInfo>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for info in iter {
            catalog.insert(info);
        }
        catalog
    }
}

/// Everything known about one season, already materialized in memory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeasonData {
    pub season: Season,
    #[serde(default)]
    pub league_id: Option<LeagueId>,
    /// Playoff field size reported by the source, if any.
    #[serde(default)]
    pub playoff_teams: Option<usize>,
    pub rosters: Vec<Roster>,
    #[serde(default)]
    pub matchups: Vec<MatchupRecord>,
    /// Championship bracket rows.
    #[serde(default)]
    pub winners_bracket: Vec<BracketRecord>,
    /// Combined consolation bracket rows (both tiers together).
    #[serde(default)]
    pub losers_bracket: Vec<BracketRecord>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub players: PlayerCatalog,
}

impl SeasonData {
    pub fn roster(&self, roster_id: RosterId) -> Option<&Roster> {
        self.rosters.iter().find(|r| r.roster_id == roster_id)
    }

    /// Team name for a roster, with a stable fallback for unknown rosters.
    pub fn team_name(&self, roster_id: RosterId) -> String {
        self.roster(roster_id)
            .map(|r| r.team_name.clone())
            .unwrap_or_else(|| format!("Team {}", roster_id))
    }

    /// Last week with any matchup data.
    pub fn last_week(&self) -> Option<Week> {
        self.matchups.iter().map(|m| m.week).max()
    }
}
