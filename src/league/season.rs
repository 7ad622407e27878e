//! One-call summary of a season: standings, brackets, outcomes and
//! transaction values.

use crate::cli::types::{LeagueId, RosterId, Season, Week};
use crate::core::config::LeagueConfig;
use crate::error::LeagueError;
use crate::league::bracket::{resolve_championship, Bracket, BracketNode, BracketStatus};
use crate::league::consolation::{partition_consolation, Consolation};
use crate::league::models::SeasonData;
use crate::league::seeds::{assign_seeds, Seed, SeedMap};
use crate::league::transactions::{
    count_transactions, value_pickups, value_trades, PickupValue, TradeValue, TransactionCounts,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingRow {
    pub seed: Seed,
    pub roster_id: RosterId,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlayoffRecord {
    pub wins: u32,
    pub losses: u32,
}

/// Resolved postseason of a season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Playoffs {
    pub field_size: usize,
    pub championship: Bracket,
    /// `None` when the configured tier ranges are not a bracket shape.
    pub consolation: Option<Consolation>,
    pub champion: Option<String>,
    pub runner_up: Option<String>,
    pub toilet_bowl_champion: Option<String>,
    pub last_place: Option<String>,
    /// Rosters seeded inside the playoff field.
    pub participants: Vec<RosterId>,
    /// Wins and losses in decided championship-bracket games.
    pub records: BTreeMap<RosterId, PlayoffRecord>,
    /// Rosters seeded into the toilet bowl.
    pub toilet_bowl_participants: Vec<RosterId>,
    /// Wins and losses in decided toilet-bowl games.
    pub toilet_bowl_records: BTreeMap<RosterId, PlayoffRecord>,
}

impl Playoffs {
    pub fn status(&self) -> BracketStatus {
        self.championship.status()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlayoffOutcome {
    Resolved(Box<Playoffs>),
    /// The playoff field is not a 4 or 8 team bracket.
    Unsupported { field_size: usize },
}

impl PlayoffOutcome {
    pub fn playoffs(&self) -> Option<&Playoffs> {
        match self {
            PlayoffOutcome::Resolved(playoffs) => Some(playoffs),
            PlayoffOutcome::Unsupported { .. } => None,
        }
    }

    /// Playoffs with a crowned champion.
    pub fn completed(&self) -> Option<&Playoffs> {
        self.playoffs()
            .filter(|p| p.status() == BracketStatus::Complete)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSummary {
    pub season: Season,
    pub league_id: Option<LeagueId>,
    pub standings: Vec<StandingRow>,
    /// Best regular-season record (seed 1).
    pub first_place: Option<String>,
    pub playoffs: PlayoffOutcome,
    /// Last week included in transaction values.
    pub through: Week,
    pub pickups: Vec<PickupValue>,
    pub trades: Vec<TradeValue>,
    pub transaction_counts: BTreeMap<RosterId, TransactionCounts>,
}

fn standings(data: &SeasonData, seeds: &SeedMap) -> Vec<StandingRow> {
    seeds
        .ranked()
        .into_iter()
        .filter_map(|(seed, roster_id)| {
            let roster = data.roster(roster_id)?;
            Some(StandingRow {
                seed,
                roster_id,
                team_name: roster.team_name.clone(),
                wins: roster.wins,
                losses: roster.losses,
                ties: roster.ties,
                points_for: roster.points_for,
            })
        })
        .collect()
}

/// Rosters whose seed passes `keep`, best seed first.
fn seeded_rosters(seeds: &SeedMap, keep: impl Fn(Seed) -> bool) -> Vec<RosterId> {
    seeds
        .ranked()
        .into_iter()
        .filter(|(seed, _)| keep(*seed))
        .map(|(_, roster)| roster)
        .collect()
}

fn game_records<'a>(
    games: impl Iterator<Item = &'a BracketNode>,
) -> BTreeMap<RosterId, PlayoffRecord> {
    let mut records: BTreeMap<RosterId, PlayoffRecord> = BTreeMap::new();
    for node in games {
        if let (Some(winner), Some(loser)) = (node.winner, node.loser()) {
            records.entry(winner).or_default().wins += 1;
            records.entry(loser).or_default().losses += 1;
        }
    }
    records
}

/// Resolve the championship bracket and both consolation tiers.
pub fn resolve_playoffs(
    data: &SeasonData,
    seeds: &SeedMap,
    config: &LeagueConfig,
) -> PlayoffOutcome {
    let field_size = data.playoff_teams.unwrap_or(config.playoff_teams);
    let championship = match resolve_championship(&data.winners_bracket, seeds, field_size) {
        Ok(bracket) => bracket,
        Err(LeagueError::UnsupportedBracket { field_size }) => {
            warn!(season = %data.season, field_size, "playoff bracket shape not supported");
            return PlayoffOutcome::Unsupported { field_size };
        }
        Err(e) => {
            warn!(season = %data.season, error = %e, "could not resolve playoff bracket");
            return PlayoffOutcome::Unsupported { field_size };
        }
    };

    let consolation = match partition_consolation(
        &data.losers_bracket,
        seeds,
        &config.middle_range(),
        &config.lower_range(),
    ) {
        Ok(consolation) => Some(consolation),
        Err(e) => {
            debug!(season = %data.season, error = %e, "consolation tiers not resolved");
            None
        }
    };

    let name = |roster: Option<RosterId>| roster.map(|r| data.team_name(r));
    let participants = seeded_rosters(seeds, |seed| usize::from(seed) <= field_size);
    let (toilet_bowl_participants, toilet_bowl_records) = match &consolation {
        Some(c) => {
            let (low, high) = c.lower.seeds;
            (
                seeded_rosters(seeds, |seed| (low..=high).contains(&seed)),
                game_records(c.lower.games()),
            )
        }
        None => (Vec::new(), BTreeMap::new()),
    };

    PlayoffOutcome::Resolved(Box::new(Playoffs {
        field_size,
        champion: name(championship.champion()),
        runner_up: name(championship.runner_up()),
        toilet_bowl_champion: name(consolation.as_ref().and_then(|c| c.lower.champion())),
        last_place: name(consolation.as_ref().and_then(|c| c.lower.last_place())),
        participants,
        records: game_records(championship.nodes()),
        toilet_bowl_participants,
        toilet_bowl_records,
        championship,
        consolation,
    }))
}

/// Build the full summary of one season.
pub fn summarize_season(data: &SeasonData, config: &LeagueConfig) -> SeasonSummary {
    let seeds = assign_seeds(&data.rosters);
    let through = config.last_week();

    SeasonSummary {
        season: data.season,
        league_id: data.league_id.clone(),
        standings: standings(data, &seeds),
        first_place: seeds.roster_for(1).map(|r| data.team_name(r)),
        playoffs: resolve_playoffs(data, &seeds, config),
        through,
        pickups: value_pickups(data, through),
        trades: value_trades(data, through),
        transaction_counts: count_transactions(&data.transactions),
    }
}
