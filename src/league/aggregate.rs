//! All-time records across seasons.
//!
//! Each season is summarized on its own and turned into a partial
//! [`LeagueRecords`]; partials are merged with sums and bounded leaderboards,
//! so seasons can be folded in any order (and in parallel).
//!
//! Totals are keyed by team name since roster ids are only meaningful inside
//! one season.

use crate::cli::types::{Season, Week};
use crate::core::config::LeagueConfig;
use crate::league::models::{SeasonData, TransactionClass};
use crate::league::season::{summarize_season, SeasonSummary};
use crate::league::transactions::{PickupValue, TradeOutcome, TradeValue, TransactionCounts};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::warn;

#[cfg(test)]
mod tests;

/// Fewest decided games before a win percentage is reported.
pub const MIN_GAMES_FOR_WIN_PCT: u32 = 3;

fn win_pct(wins: u32, losses: u32) -> Option<f64> {
    let games = wins + losses;
    (games >= MIN_GAMES_FOR_WIN_PCT).then(|| f64::from(wins) * 100.0 / f64::from(games))
}

/// Running totals for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TeamRecord {
    pub seasons: u32,
    pub championships: u32,
    pub runner_ups: u32,
    pub playoff_appearances: u32,
    pub playoff_wins: u32,
    pub playoff_losses: u32,
    pub toilet_bowl_appearances: u32,
    pub toilet_bowl_wins: u32,
    pub toilet_bowl_losses: u32,
    pub toilet_bowl_titles: u32,
    pub last_place_finishes: u32,
    /// Regular-season first place (seed 1).
    pub first_place_finishes: u32,
    pub transactions: TransactionCounts,
}

impl TeamRecord {
    /// Championship-bracket win percentage, once enough games are decided.
    pub fn playoff_win_pct(&self) -> Option<f64> {
        win_pct(self.playoff_wins, self.playoff_losses)
    }

    pub fn toilet_bowl_win_pct(&self) -> Option<f64> {
        win_pct(self.toilet_bowl_wins, self.toilet_bowl_losses)
    }

    fn merge(&mut self, other: &TeamRecord) {
        self.seasons += other.seasons;
        self.championships += other.championships;
        self.runner_ups += other.runner_ups;
        self.playoff_appearances += other.playoff_appearances;
        self.playoff_wins += other.playoff_wins;
        self.playoff_losses += other.playoff_losses;
        self.toilet_bowl_appearances += other.toilet_bowl_appearances;
        self.toilet_bowl_wins += other.toilet_bowl_wins;
        self.toilet_bowl_losses += other.toilet_bowl_losses;
        self.toilet_bowl_titles += other.toilet_bowl_titles;
        self.last_place_finishes += other.last_place_finishes;
        self.first_place_finishes += other.first_place_finishes;
        self.transactions = self.transactions + other.transactions;
    }
}

/// Leaderboard entry for a valued pickup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickupRecord {
    pub season: Season,
    pub week: Week,
    pub team_name: String,
    pub player_name: String,
    pub class: TransactionClass,
    pub waiver_bid: Option<u32>,
    pub lineup_points: f64,
    pub bench_points: f64,
    pub starts: u32,
}

impl PickupRecord {
    /// `None` for pickups whose value is unavailable.
    pub fn from_pickup(pickup: &PickupValue) -> Option<Self> {
        let value = pickup.value.value()?;
        Some(Self {
            season: pickup.season,
            week: pickup.week,
            team_name: pickup.team_name.clone(),
            player_name: pickup
                .player_name
                .clone()
                .unwrap_or_else(|| pickup.player_id.to_string()),
            class: pickup.class,
            waiver_bid: pickup.waiver_bid,
            lineup_points: value.lineup_points,
            bench_points: value.bench_points,
            starts: value.starts,
        })
    }

    /// Lineup points per start; `None` for a player never started.
    pub fn points_per_start(&self) -> Option<f64> {
        (self.starts > 0).then(|| self.lineup_points / f64::from(self.starts))
    }

    fn tiebreak(&self, other: &Self) -> Ordering {
        self.season
            .cmp(&other.season)
            .then_with(|| self.week.cmp(&other.week))
            .then_with(|| self.team_name.cmp(&other.team_name))
            .then_with(|| self.player_name.cmp(&other.player_name))
    }
}

/// Leaderboard entry for a valued two-team trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub season: Season,
    pub week: Week,
    pub transaction_id: String,
    /// Side with more lineup points (the first side of an even trade).
    pub winner: String,
    pub winner_points: f64,
    pub loser: String,
    pub loser_points: f64,
    pub gap: f64,
    pub fair: bool,
}

impl TradeRecord {
    /// `None` unless the trade has a verdict.
    pub fn from_trade(trade: &TradeValue) -> Option<Self> {
        let TradeOutcome::Attributed { sides, verdict } = &trade.outcome else {
            return None;
        };
        let verdict = (*verdict)?;
        let [first, second] = sides.as_slice() else {
            return None;
        };
        let (winner, loser) = if verdict.winner == Some(second.roster_id) {
            (second, first)
        } else {
            (first, second)
        };
        Some(Self {
            season: trade.season,
            week: trade.week,
            transaction_id: trade.transaction_id.clone(),
            winner: winner.team_name.clone(),
            winner_points: winner.total.lineup_points()?,
            loser: loser.team_name.clone(),
            loser_points: loser.total.lineup_points()?,
            gap: verdict.gap,
            fair: verdict.fair,
        })
    }
}

fn most_lopsided_first(a: &TradeRecord, b: &TradeRecord) -> Ordering {
    b.gap
        .total_cmp(&a.gap)
        .then_with(|| a.season.cmp(&b.season))
        .then_with(|| a.week.cmp(&b.week))
        .then_with(|| a.transaction_id.cmp(&b.transaction_id))
}

fn best_first(a: &PickupRecord, b: &PickupRecord) -> Ordering {
    b.lineup_points
        .total_cmp(&a.lineup_points)
        .then_with(|| a.tiebreak(b))
}

fn worst_first(a: &PickupRecord, b: &PickupRecord) -> Ordering {
    a.lineup_points
        .total_cmp(&b.lineup_points)
        .then_with(|| a.tiebreak(b))
}

fn bounded<T>(mut entries: Vec<T>, order: fn(&T, &T) -> Ordering, size: usize) -> Vec<T> {
    entries.sort_by(order);
    entries.truncate(size);
    entries
}

/// Multi-season totals and leaderboards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueRecords {
    pub teams: BTreeMap<String, TeamRecord>,
    /// Highest lineup points after pickup.
    pub best_pickups: Vec<PickupRecord>,
    /// Lowest lineup points among waiver claims with a bid.
    pub worst_waiver_claims: Vec<PickupRecord>,
    /// Two-team trades with the widest lineup-point gap.
    pub most_lopsided_trades: Vec<TradeRecord>,
    /// Seasons folded in, oldest first.
    pub seasons: Vec<Season>,
    /// Seasons whose playoff results were left out of the totals.
    pub skipped: Vec<Season>,
    leaderboard_size: usize,
}

impl LeagueRecords {
    pub fn empty(leaderboard_size: usize) -> Self {
        Self {
            teams: BTreeMap::new(),
            best_pickups: Vec::new(),
            worst_waiver_claims: Vec::new(),
            most_lopsided_trades: Vec::new(),
            seasons: Vec::new(),
            skipped: Vec::new(),
            leaderboard_size,
        }
    }

    fn team(&mut self, name: &str) -> &mut TeamRecord {
        self.teams.entry(name.to_string()).or_default()
    }

    /// Record a season that could not be loaded at all.
    pub fn mark_skipped(&mut self, season: Season) {
        if let Err(idx) = self.skipped.binary_search(&season) {
            self.skipped.insert(idx, season);
        }
    }

    /// Partial records for a single season.
    pub fn from_summary(summary: &SeasonSummary, leaderboard_size: usize) -> Self {
        let mut records = Self::empty(leaderboard_size);
        records.seasons.push(summary.season);

        for row in &summary.standings {
            let team = records.team(&row.team_name);
            team.seasons += 1;
            if let Some(counts) = summary.transaction_counts.get(&row.roster_id) {
                team.transactions = team.transactions + *counts;
            }
        }
        if let Some(name) = &summary.first_place {
            records.team(name).first_place_finishes += 1;
        }

        match summary.playoffs.completed() {
            Some(playoffs) => {
                let name_of = |roster_id| {
                    summary
                        .standings
                        .iter()
                        .find(|row| row.roster_id == roster_id)
                        .map(|row| row.team_name.clone())
                };
                for roster_id in &playoffs.participants {
                    if let Some(name) = name_of(*roster_id) {
                        records.team(&name).playoff_appearances += 1;
                    }
                }
                for (roster_id, record) in &playoffs.records {
                    if let Some(name) = name_of(*roster_id) {
                        let team = records.team(&name);
                        team.playoff_wins += record.wins;
                        team.playoff_losses += record.losses;
                    }
                }
                for roster_id in &playoffs.toilet_bowl_participants {
                    if let Some(name) = name_of(*roster_id) {
                        records.team(&name).toilet_bowl_appearances += 1;
                    }
                }
                for (roster_id, record) in &playoffs.toilet_bowl_records {
                    if let Some(name) = name_of(*roster_id) {
                        let team = records.team(&name);
                        team.toilet_bowl_wins += record.wins;
                        team.toilet_bowl_losses += record.losses;
                    }
                }
                if let Some(name) = &playoffs.champion {
                    records.team(name).championships += 1;
                }
                if let Some(name) = &playoffs.runner_up {
                    records.team(name).runner_ups += 1;
                }
                if let Some(name) = &playoffs.toilet_bowl_champion {
                    records.team(name).toilet_bowl_titles += 1;
                }
                if let Some(name) = &playoffs.last_place {
                    records.team(name).last_place_finishes += 1;
                }
            }
            None => {
                warn!(season = %summary.season, "playoffs unresolved, leaving them out of the totals");
                records.skipped.push(summary.season);
            }
        }

        let valued: Vec<PickupRecord> = summary
            .pickups
            .iter()
            .filter_map(PickupRecord::from_pickup)
            .collect();
        let claims = valued
            .iter()
            .filter(|p| p.class == TransactionClass::Waiver)
            .cloned()
            .collect();
        records.worst_waiver_claims = bounded(claims, worst_first, leaderboard_size);
        records.best_pickups = bounded(valued, best_first, leaderboard_size);

        let trades = summary
            .trades
            .iter()
            .filter_map(TradeRecord::from_trade)
            .collect();
        records.most_lopsided_trades = bounded(trades, most_lopsided_first, leaderboard_size);

        records
    }

    /// Combine two partial results. Commutative and associative.
    pub fn merge(mut self, other: Self) -> Self {
        for (name, record) in &other.teams {
            self.team(name).merge(record);
        }
        let size = self.leaderboard_size.max(other.leaderboard_size);
        self.leaderboard_size = size;

        self.best_pickups.extend(other.best_pickups);
        self.best_pickups = bounded(std::mem::take(&mut self.best_pickups), best_first, size);
        self.worst_waiver_claims.extend(other.worst_waiver_claims);
        self.worst_waiver_claims = bounded(
            std::mem::take(&mut self.worst_waiver_claims),
            worst_first,
            size,
        );
        self.most_lopsided_trades.extend(other.most_lopsided_trades);
        self.most_lopsided_trades = bounded(
            std::mem::take(&mut self.most_lopsided_trades),
            most_lopsided_first,
            size,
        );

        self.seasons.extend(other.seasons);
        self.seasons.sort();
        self.seasons.dedup();
        for season in other.skipped {
            self.mark_skipped(season);
        }
        self
    }
}

/// Fold every season into all-time records, one season per rayon task.
pub fn aggregate_seasons(seasons: &[SeasonData], config: &LeagueConfig) -> LeagueRecords {
    let size = config.leaderboard_size;
    seasons
        .par_iter()
        .map(|data| LeagueRecords::from_summary(&summarize_season(data, config), size))
        .reduce(|| LeagueRecords::empty(size), LeagueRecords::merge)
}
