//! Conversion from raw Sleeper payloads to [`SeasonData`].

use std::collections::BTreeMap;

use tracing::debug;

use crate::cli::types::{LeagueId, PlayerId, RosterId, Season, Week};
use crate::core::config::LeagueConfig;
use crate::league::models::{
    BracketRecord, LineupSnapshot, MatchupRecord, PlayerCatalog, PlayerInfo, Roster, SeasonData,
    Transaction, TransactionKind,
};
use crate::sleeper::types::{
    RawBracketMatchup, RawMatchup, RawPlayer, RawRoster, RawSeason, RawTransaction, RawUser,
};

#[cfg(test)]
mod tests;

/// Sleeper fills empty starting slots with this id.
const EMPTY_SLOT: &str = "0";

const KEPT_STATUSES: [&str; 3] = ["complete", "approved", "processed"];

/// Team name for a roster: owner display name, then username, then "Team N",
/// passed through the alias table.
pub fn team_name(
    roster: &RawRoster,
    users: &BTreeMap<&str, &RawUser>,
    config: &LeagueConfig,
) -> String {
    let raw = roster
        .owner_id
        .as_deref()
        .and_then(|owner| users.get(owner))
        .and_then(|user| {
            user.display_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .or_else(|| user.username.clone())
        })
        .unwrap_or_else(|| format!("Team {}", roster.roster_id));
    config.normalize_team_name(&raw)
}

pub fn convert_rosters(
    rosters: &[RawRoster],
    users: &[RawUser],
    season: Season,
    config: &LeagueConfig,
) -> Vec<Roster> {
    let users: BTreeMap<&str, &RawUser> = users.iter().map(|u| (u.user_id.as_str(), u)).collect();
    rosters
        .iter()
        .map(|raw| Roster {
            roster_id: RosterId::new(raw.roster_id),
            owner_id: raw.owner_id.clone(),
            team_name: team_name(raw, &users, config),
            season,
            wins: raw.settings.wins,
            losses: raw.settings.losses,
            ties: raw.settings.ties,
            points_for: raw.settings.points_for(),
        })
        .collect()
}

fn lineup(row: &RawMatchup) -> LineupSnapshot {
    LineupSnapshot {
        roster_id: RosterId::new(row.roster_id),
        points: row.points.unwrap_or(0.0),
        starters: row
            .starters
            .iter()
            .flatten()
            .filter(|id| id.as_str() != EMPTY_SLOT)
            .map(|id| PlayerId::new(id.as_str()))
            .collect(),
        players_points: row
            .players_points
            .iter()
            .flatten()
            .map(|(id, pts)| (PlayerId::new(id.as_str()), *pts))
            .collect(),
    }
}

/// Pair one week's rows by `matchup_id`. Rows without one are byes.
pub fn convert_matchups(season: Season, week: u16, rows: &[RawMatchup]) -> Vec<MatchupRecord> {
    let week = Week::new(week);
    let mut paired: BTreeMap<u32, Vec<&RawMatchup>> = BTreeMap::new();
    let mut records = Vec::new();

    for row in rows {
        match row.matchup_id {
            Some(id) => paired.entry(id).or_default().push(row),
            None => records.push(MatchupRecord {
                season,
                week,
                matchup_id: None,
                home: lineup(row),
                away: None,
            }),
        }
    }

    for (matchup_id, sides) in paired {
        let mut sides = sides.into_iter();
        let Some(home) = sides.next() else {
            continue;
        };
        let away = sides.next();
        let extra = sides.count();
        if extra > 0 {
            debug!(%week, matchup_id, extra, "dropping extra rows sharing a matchup id");
        }
        records.push(MatchupRecord {
            season,
            week,
            matchup_id: Some(matchup_id),
            home: lineup(home),
            away: away.map(lineup),
        });
    }

    records
}

pub fn convert_bracket(rows: &[RawBracketMatchup]) -> Vec<BracketRecord> {
    rows.iter()
        .map(|row| BracketRecord {
            round: row.r,
            matchup_id: row.m,
            team1: row.t1.map(RosterId::new),
            team2: row.t2.map(RosterId::new),
            winner: row.w.map(RosterId::new),
            loser: row.l.map(RosterId::new),
            placement: row.p,
        })
        .collect()
}

fn transaction_kind(raw: &str) -> Option<TransactionKind> {
    match raw {
        "trade" => Some(TransactionKind::Trade),
        "waiver" => Some(TransactionKind::Waiver),
        "free_agent" => Some(TransactionKind::FreeAgent),
        "commissioner" => Some(TransactionKind::Commissioner),
        _ => None,
    }
}

fn player_map(raw: &Option<BTreeMap<String, u32>>) -> BTreeMap<PlayerId, RosterId> {
    raw.iter()
        .flatten()
        .map(|(player, roster)| (PlayerId::new(player.as_str()), RosterId::new(*roster)))
        .collect()
}

/// Keep processed transactions only. The week is the transaction's `leg`
/// when present, else the week it was fetched for.
pub fn convert_transactions(season: Season, week: u16, rows: &[RawTransaction]) -> Vec<Transaction> {
    rows.iter()
        .filter_map(|raw| {
            if !KEPT_STATUSES.contains(&raw.status.as_str()) {
                debug!(id = %raw.transaction_id, status = %raw.status, "skipping unprocessed transaction");
                return None;
            }
            let Some(kind) = transaction_kind(&raw.kind) else {
                debug!(id = %raw.transaction_id, kind = %raw.kind, "skipping unknown transaction type");
                return None;
            };
            Some(Transaction {
                transaction_id: raw.transaction_id.clone(),
                season,
                week: Week::new(raw.leg.unwrap_or(week)),
                kind,
                adds: player_map(&raw.adds),
                drops: player_map(&raw.drops),
                waiver_bid: raw.settings.as_ref().and_then(|s| s.waiver_bid),
                roster_ids: raw
                    .roster_ids
                    .iter()
                    .flatten()
                    .map(|&id| RosterId::new(id))
                    .collect(),
            })
        })
        .collect()
}

/// Build the season's player catalog.
///
/// With the full player list, every player referenced by a lineup or a
/// transaction is looked up in it. Without it, placeholders are created for
/// players seen in weekly lineups only.
pub fn build_catalog(
    matchups: &[MatchupRecord],
    transactions: &[Transaction],
    players: Option<&BTreeMap<String, RawPlayer>>,
) -> PlayerCatalog {
    let mut catalog = PlayerCatalog::new();
    let in_lineups = matchups
        .iter()
        .flat_map(MatchupRecord::sides)
        .flat_map(|side| side.starters.iter().chain(side.players_points.keys()));

    let Some(players) = players else {
        for player in in_lineups {
            catalog.ensure(player);
        }
        return catalog;
    };

    let in_transactions = transactions
        .iter()
        .flat_map(|tx| tx.adds.keys().chain(tx.drops.keys()));
    for player in in_lineups.chain(in_transactions) {
        if let Some(raw) = players.get(player.as_str()) {
            catalog.insert(PlayerInfo {
                player_id: player.clone(),
                name: raw
                    .display_name()
                    .unwrap_or_else(|| format!("Player {}", player)),
                position: raw.position.clone(),
            });
        }
    }
    catalog
}

/// Convert a fetched season into the in-memory model.
pub fn convert_season(
    raw: &RawSeason,
    season: Season,
    league_id: LeagueId,
    config: &LeagueConfig,
) -> SeasonData {
    let matchups: Vec<MatchupRecord> = raw
        .matchups
        .iter()
        .flat_map(|(week, rows)| convert_matchups(season, *week, rows))
        .collect();
    let transactions: Vec<Transaction> = raw
        .transactions
        .iter()
        .flat_map(|(week, rows)| convert_transactions(season, *week, rows))
        .collect();
    let players = build_catalog(&matchups, &transactions, raw.players.as_ref());

    SeasonData {
        season,
        league_id: Some(league_id),
        playoff_teams: raw
            .league
            .settings
            .playoff_teams
            .and_then(|n| usize::try_from(n).ok()),
        rosters: convert_rosters(&raw.rosters, &raw.users, season, config),
        matchups,
        winners_bracket: convert_bracket(&raw.winners_bracket),
        losers_bracket: convert_bracket(&raw.losers_bracket),
        transactions,
        players,
    }
}
