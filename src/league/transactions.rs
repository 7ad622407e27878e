//! Post-acquisition value of roster transactions.
//!
//! A transaction is valued by walking the acquiring roster's weekly lineups
//! from the week after the move through the end of the season and splitting
//! the player's points into lineup (started) and bench (rostered, not
//! started) buckets. Waiver pickups and both sides of a two-team trade go
//! through the same [`attribute`] call so the numbers always agree.

use crate::cli::types::{PlayerId, RosterId, Season, Week};
use crate::league::models::{
    LineupSnapshot, PlayerCatalog, SeasonData, Transaction, TransactionClass,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Add;
use tracing::debug;


/// Points credited to an acquired player after the acquisition week.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ValueAttribution {
    pub lineup_points: f64,
    pub bench_points: f64,
    pub starts: u32,
}

impl Add for ValueAttribution {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            lineup_points: self.lineup_points + other.lineup_points,
            bench_points: self.bench_points + other.bench_points,
            starts: self.starts + other.starts,
        }
    }
}

/// Result of valuing one acquisition.
///
/// `Unavailable` means the player could not be looked up, which is different
/// from a player who simply scored nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Attribution {
    Available(ValueAttribution),
    Unavailable,
}

impl Attribution {
    pub fn value(&self) -> Option<&ValueAttribution> {
        match self {
            Attribution::Available(value) => Some(value),
            Attribution::Unavailable => None,
        }
    }

    pub fn lineup_points(&self) -> Option<f64> {
        self.value().map(|v| v.lineup_points)
    }

    /// Sum of two attributions; unknown on either side makes the total unknown.
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Attribution::Available(a), Attribution::Available(b)) => Attribution::Available(a + b),
            _ => Attribution::Unavailable,
        }
    }
}

/// A player joining a roster in a given week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquisition {
    pub roster_id: RosterId,
    pub player_id: PlayerId,
    pub week: Week,
}

/// Weekly lineups of a season keyed by (week, roster).
#[derive(Debug, Default)]
pub struct LineupIndex<'a> {
    lineups: BTreeMap<(Week, RosterId), &'a LineupSnapshot>,
}

impl<'a> LineupIndex<'a> {
    pub fn from_season(season: &'a SeasonData) -> Self {
        let mut lineups = BTreeMap::new();
        for matchup in &season.matchups {
            for side in matchup.sides() {
                lineups.entry((matchup.week, side.roster_id)).or_insert(side);
            }
        }
        Self { lineups }
    }

    pub fn get(&self, week: Week, roster_id: RosterId) -> Option<&'a LineupSnapshot> {
        self.lineups.get(&(week, roster_id)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.lineups.is_empty()
    }
}

/// Value an acquisition over weeks `acquisition.week + 1 ..= through`.
///
/// Weeks without a lineup for the roster contribute nothing. A started week
/// counts as a start even when no points were recorded for the player.
pub fn attribute(
    index: &LineupIndex<'_>,
    catalog: &PlayerCatalog,
    acquisition: &Acquisition,
    through: Week,
) -> Attribution {
    if catalog.resolve(&acquisition.player_id).is_none() {
        debug!(player = %acquisition.player_id, "player not in catalog, value unavailable");
        return Attribution::Unavailable;
    }

    let mut value = ValueAttribution::default();
    let first = acquisition.week.next().as_u16();

    for week in first..=through.as_u16() {
        let Some(lineup) = index.get(Week::new(week), acquisition.roster_id) else {
            continue;
        };
        let points = lineup.points_for(&acquisition.player_id);
        if lineup.started(&acquisition.player_id) {
            value.lineup_points += points.unwrap_or(0.0);
            value.starts += 1;
        } else if let Some(points) = points.filter(|p| *p != 0.0) {
            value.bench_points += points;
        }
    }

    Attribution::Available(value)
}

/// A valued waiver or free-agent pickup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickupValue {
    pub transaction_id: String,
    pub season: Season,
    pub week: Week,
    pub roster_id: RosterId,
    pub team_name: String,
    pub player_id: PlayerId,
    pub player_name: Option<String>,
    pub position: Option<String>,
    pub dropped_player: Option<String>,
    pub class: TransactionClass,
    pub waiver_bid: Option<u32>,
    pub value: Attribution,
}

fn player_name(catalog: &PlayerCatalog, player_id: &PlayerId) -> Option<String> {
    catalog.resolve(player_id).map(|info| info.name)
}

/// Value every non-trade add of the season, one entry per added player.
pub fn value_pickups(season: &SeasonData, through: Week) -> Vec<PickupValue> {
    let index = LineupIndex::from_season(season);
    let mut pickups = Vec::new();

    for tx in &season.transactions {
        let class = tx.class();
        if class == TransactionClass::Trade {
            continue;
        }
        let dropped = tx
            .dropped_player_id()
            .map(|id| player_name(&season.players, id).unwrap_or_else(|| id.to_string()));

        for (player_id, roster_id) in &tx.adds {
            let acquisition = Acquisition {
                roster_id: *roster_id,
                player_id: player_id.clone(),
                week: tx.week,
            };
            let info = season.players.resolve(player_id);
            pickups.push(PickupValue {
                transaction_id: tx.transaction_id.clone(),
                season: season.season,
                week: tx.week,
                roster_id: *roster_id,
                team_name: season.team_name(*roster_id),
                player_id: player_id.clone(),
                player_name: info.as_ref().map(|i| i.name.clone()),
                position: info.and_then(|i| i.position),
                dropped_player: dropped.clone(),
                class,
                waiver_bid: tx.waiver_bid,
                value: attribute(&index, &season.players, &acquisition, through),
            });
        }
    }

    pickups
}

/// One received player on one side of a trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerValue {
    pub player_id: PlayerId,
    pub player_name: Option<String>,
    pub value: Attribution,
}

/// What one roster got out of a trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSide {
    pub roster_id: RosterId,
    pub team_name: String,
    pub received: Vec<PlayerValue>,
    pub total: Attribution,
}

/// Trades decided by fewer lineup points than this are fair.
pub const FAIR_TRADE_GAP: f64 = 20.0;

/// Which side of a two-team trade came out ahead on lineup points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TradeVerdict {
    /// `None` when both sides scored exactly the same.
    pub winner: Option<RosterId>,
    pub gap: f64,
    pub fair: bool,
}

impl TradeVerdict {
    /// Compare two sides. `None` unless both totals are known.
    pub fn between(first: &TradeSide, second: &TradeSide) -> Option<Self> {
        let a = first.total.lineup_points()?;
        let b = second.total.lineup_points()?;
        let winner = match a.total_cmp(&b) {
            Ordering::Greater => Some(first.roster_id),
            Ordering::Less => Some(second.roster_id),
            Ordering::Equal => None,
        };
        let gap = (a - b).abs();
        Some(Self {
            winner,
            gap,
            fair: gap < FAIR_TRADE_GAP,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TradeOutcome {
    /// Two-team trade, one side per roster ordered by roster id.
    Attributed {
        sides: Vec<TradeSide>,
        verdict: Option<TradeVerdict>,
    },
    /// Trades among three or more rosters (or malformed ones) are not valued.
    NotAttributable { rosters: Vec<RosterId> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeValue {
    pub transaction_id: String,
    pub season: Season,
    pub week: Week,
    pub outcome: TradeOutcome,
}

fn value_trade(
    season: &SeasonData,
    index: &LineupIndex<'_>,
    tx: &Transaction,
    through: Week,
) -> TradeOutcome {
    let rosters: Vec<RosterId> = tx.rosters().into_iter().collect();
    if rosters.len() != 2 {
        debug!(
            transaction = %tx.transaction_id,
            rosters = rosters.len(),
            "trade is not between exactly two rosters"
        );
        return TradeOutcome::NotAttributable { rosters };
    }

    let sides: Vec<TradeSide> = rosters
        .iter()
        .map(|&roster_id| {
            let received: Vec<PlayerValue> = tx
                .adds
                .iter()
                .filter(|(_, to)| **to == roster_id)
                .map(|(player_id, _)| {
                    let acquisition = Acquisition {
                        roster_id,
                        player_id: player_id.clone(),
                        week: tx.week,
                    };
                    PlayerValue {
                        player_id: player_id.clone(),
                        player_name: player_name(&season.players, player_id),
                        value: attribute(index, &season.players, &acquisition, through),
                    }
                })
                .collect();
            let total = received
                .iter()
                .fold(Attribution::Available(ValueAttribution::default()), |acc, p| {
                    acc.combine(p.value)
                });
            TradeSide {
                roster_id,
                team_name: season.team_name(roster_id),
                received,
                total,
            }
        })
        .collect();

    let verdict = match sides.as_slice() {
        [first, second] => TradeVerdict::between(first, second),
        _ => None,
    };
    TradeOutcome::Attributed { sides, verdict }
}

/// Value every trade of the season.
pub fn value_trades(season: &SeasonData, through: Week) -> Vec<TradeValue> {
    let index = LineupIndex::from_season(season);
    season
        .transactions
        .iter()
        .filter(|tx| tx.class() == TransactionClass::Trade)
        .map(|tx| TradeValue {
            transaction_id: tx.transaction_id.clone(),
            season: season.season,
            week: tx.week,
            outcome: value_trade(season, &index, tx, through),
        })
        .collect()
}

/// Per-roster transaction tallies for one season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TransactionCounts {
    /// Every transaction the roster took part in.
    pub moves: u32,
    pub free_agent_pickups: u32,
    pub waiver_claims: u32,
    pub trades: u32,
}

impl Add for TransactionCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            moves: self.moves + other.moves,
            free_agent_pickups: self.free_agent_pickups + other.free_agent_pickups,
            waiver_claims: self.waiver_claims + other.waiver_claims,
            trades: self.trades + other.trades,
        }
    }
}

pub fn count_transactions(transactions: &[Transaction]) -> BTreeMap<RosterId, TransactionCounts> {
    let mut counts: BTreeMap<RosterId, TransactionCounts> = BTreeMap::new();
    for tx in transactions {
        let class = tx.class();
        for roster_id in tx.rosters() {
            let entry = counts.entry(roster_id).or_default();
            entry.moves += 1;
            match class {
                TransactionClass::Trade => entry.trades += 1,
                TransactionClass::Waiver if tx.adds.values().any(|r| *r == roster_id) => {
                    entry.waiver_claims += 1
                }
                TransactionClass::FreeAgent if tx.adds.values().any(|r| *r == roster_id) => {
                    entry.free_agent_pickups += 1
                }
                _ => {}
            }
        }
    }
    counts
}
