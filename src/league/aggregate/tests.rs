//! Unit tests for cross-season aggregation

use super::*;
use crate::cli::types::{PlayerId, RosterId};
use crate::league::models::{
    BracketRecord, LineupSnapshot, MatchupRecord, PlayerInfo, Roster, Transaction,
    TransactionKind,
};

const NAMES: [&str; 8] = [
    "Gridiron Gus", "Mickey V", "Air Raid", "Bench Mob", "Dynasty Dan", "Punt God", "Blitz",
    "Waiver Wire",
];

/// Eight rosters, roster N seeded N; `shift` rotates which team owns which
/// roster slot so different seasons crown different names.
fn rosters(year: u16, shift: usize) -> Vec<Roster> {
    (1..=8u32)
        .map(|id| Roster {
            roster_id: RosterId::new(id),
            owner_id: None,
            team_name: NAMES[(id as usize - 1 + shift) % NAMES.len()].to_string(),
            season: Season::new(year),
            wins: 12 - id,
            losses: id + 2,
            ties: 0,
            points_for: 1600.0 - f64::from(id) * 20.0,
        })
        .collect()
}

fn record(round: u8, t1: u32, t2: u32, winner: u32) -> BracketRecord {
    BracketRecord {
        round,
        team1: Some(RosterId::new(t1)),
        team2: Some(RosterId::new(t2)),
        winner: Some(RosterId::new(winner)),
        loser: Some(RosterId::new(if winner == t1 { t2 } else { t1 })),
        ..Default::default()
    }
}

/// Four-team field: seeds 1-4 play, roster `champion` wins it all.
fn bracket(champion: u32) -> Vec<BracketRecord> {
    let top = if champion == 4 { 4 } else { 1 };
    let bottom = if champion == 3 { 3 } else { 2 };
    vec![
        record(1, 1, 4, top),
        record(1, 2, 3, bottom),
        record(2, top, bottom, champion),
    ]
}

fn waiver(id: &str, week: u16, player: &str, roster: u32, bid: u32) -> Transaction {
    Transaction {
        transaction_id: id.to_string(),
        season: Season::new(2000),
        week: Week::new(week),
        kind: TransactionKind::Waiver,
        adds: [(PlayerId::from(player), RosterId::new(roster))].into_iter().collect(),
        drops: Default::default(),
        waiver_bid: Some(bid),
        roster_ids: vec![RosterId::new(roster)],
    }
}

fn started(week: u16, roster: u32, player: &str, points: f64) -> MatchupRecord {
    MatchupRecord {
        season: Season::new(2000),
        week: Week::new(week),
        matchup_id: None,
        home: LineupSnapshot {
            roster_id: RosterId::new(roster),
            points,
            starters: vec![PlayerId::from(player)],
            players_points: [(PlayerId::from(player), points)].into_iter().collect(),
        },
        away: None,
    }
}

fn season(year: u16, shift: usize, champion: u32) -> SeasonData {
    let mut transactions = vec![
        waiver("a", 2, "100", 1, 10),
        waiver("b", 2, "200", 2, 25),
    ];
    for tx in &mut transactions {
        tx.season = Season::new(year);
    }
    SeasonData {
        season: Season::new(year),
        playoff_teams: Some(4),
        rosters: rosters(year, shift),
        winners_bracket: bracket(champion),
        matchups: vec![
            started(3, 1, "100", 30.0 + f64::from(year % 10)),
            started(3, 2, "200", 2.0),
        ],
        transactions,
        players: ["100", "200"]
            .into_iter()
            .map(|id| PlayerInfo {
                player_id: PlayerId::from(id),
                name: format!("Player {}", id),
                position: None,
            })
            .collect(),
        ..Default::default()
    }
}

fn config() -> LeagueConfig {
    LeagueConfig {
        leaderboard_size: 3,
        ..Default::default()
    }
}

#[test]
fn test_bracket_helper_crowns_requested_roster() {
    for champion in 1..=4 {
        let data = season(2001, 0, champion);
        let summary = summarize_season(&data, &config());
        let playoffs = summary.playoffs.completed().unwrap();
        assert_eq!(
            playoffs.champion.as_deref(),
            Some(NAMES[champion as usize - 1])
        );
    }
}

#[test]
fn test_totals_across_seasons() {
    let seasons = vec![season(2019, 0, 1), season(2020, 1, 1), season(2021, 0, 3)];
    let records = aggregate_seasons(&seasons, &config());

    assert_eq!(
        records.seasons,
        vec![Season::new(2019), Season::new(2020), Season::new(2021)]
    );
    assert!(records.skipped.is_empty());

    let gus = records.teams["Gridiron Gus"];
    assert_eq!(gus.seasons, 3);
    assert_eq!(gus.championships, 1);
    assert_eq!(gus.first_place_finishes, 2);
    assert_eq!(gus.playoff_appearances, 2);

    let mickey = records.teams["Mickey V"];
    assert_eq!(mickey.championships, 1);
    assert_eq!(mickey.first_place_finishes, 1);

    // 2020: won round 1 and lost the final; 2021: won both games
    let air_raid = records.teams["Air Raid"];
    assert_eq!(air_raid.championships, 1);
    assert_eq!(air_raid.runner_ups, 1);
    assert_eq!(air_raid.playoff_wins, 3);
    assert_eq!(air_raid.playoff_losses, 2);
}

#[test]
fn test_transaction_counts_are_summed_by_team() {
    let seasons = vec![season(2019, 0, 1), season(2020, 0, 1)];
    let records = aggregate_seasons(&seasons, &config());

    let gus = records.teams["Gridiron Gus"];
    assert_eq!(gus.transactions.moves, 2);
    assert_eq!(gus.transactions.waiver_claims, 2);
}

#[test]
fn test_unresolved_season_is_skipped_not_fatal() {
    let mut in_progress = season(2022, 0, 1);
    in_progress.winners_bracket.truncate(2);
    let mut unsupported = season(2023, 0, 1);
    unsupported.playoff_teams = Some(6);

    let records = aggregate_seasons(
        &[season(2021, 0, 1), in_progress, unsupported],
        &config(),
    );

    assert_eq!(records.skipped, vec![Season::new(2022), Season::new(2023)]);
    let gus = records.teams["Gridiron Gus"];
    assert_eq!(gus.seasons, 3);
    assert_eq!(gus.championships, 1);
    assert_eq!(gus.playoff_appearances, 1);
}

#[test]
fn test_leaderboards_are_bounded_and_ordered() {
    let seasons: Vec<SeasonData> = (2015..=2020).map(|y| season(y, 0, 1)).collect();
    let records = aggregate_seasons(&seasons, &config());

    assert_eq!(records.best_pickups.len(), 3);
    let points: Vec<f64> = records.best_pickups.iter().map(|p| p.lineup_points).collect();
    assert_eq!(points, vec![39.0, 38.0, 37.0]);

    assert_eq!(records.worst_waiver_claims.len(), 3);
    assert!(records
        .worst_waiver_claims
        .iter()
        .all(|p| p.lineup_points == 2.0));
    // ties fall back to the oldest season first
    assert_eq!(records.worst_waiver_claims[0].season, Season::new(2015));
}

#[test]
fn test_merge_is_order_independent() {
    let size = config().leaderboard_size;
    let partials: Vec<LeagueRecords> = [season(2018, 0, 1), season(2019, 2, 4), season(2020, 1, 3)]
        .iter()
        .map(|d| LeagueRecords::from_summary(&summarize_season(d, &config()), size))
        .collect();

    let forward = partials
        .iter()
        .cloned()
        .fold(LeagueRecords::empty(size), LeagueRecords::merge);
    let backward = partials
        .iter()
        .rev()
        .cloned()
        .fold(LeagueRecords::empty(size), LeagueRecords::merge);

    assert_eq!(forward, backward);
}

#[test]
fn test_mark_skipped_keeps_order_and_dedups() {
    let mut records = LeagueRecords::empty(5);
    records.mark_skipped(Season::new(2021));
    records.mark_skipped(Season::new(2018));
    records.mark_skipped(Season::new(2021));
    assert_eq!(records.skipped, vec![Season::new(2018), Season::new(2021)]);
}

#[test]
fn test_win_pct_needs_three_decided_games() {
    let two_games = TeamRecord {
        playoff_wins: 2,
        ..Default::default()
    };
    assert_eq!(two_games.playoff_win_pct(), None);

    let three_games = TeamRecord {
        playoff_wins: 2,
        playoff_losses: 1,
        toilet_bowl_wins: 3,
        toilet_bowl_losses: 1,
        ..Default::default()
    };
    let pct = three_games.playoff_win_pct().unwrap();
    assert!((pct - 66.666).abs() < 0.01);
    assert_eq!(three_games.toilet_bowl_win_pct(), Some(75.0));
}

#[test]
fn test_toilet_bowl_totals_across_seasons() {
    let config = LeagueConfig {
        playoff_teams: 4,
        middle_tier: [9, 12],
        lower_tier: [5, 8],
        ..config()
    };
    let with_toilet_bowl = |year| {
        let mut data = season(year, 0, 1);
        data.losers_bracket = vec![
            record(1, 5, 8, 5),
            record(1, 6, 7, 6),
            record(2, 5, 6, 5),
            record(2, 8, 7, 8),
        ];
        data
    };
    let records = aggregate_seasons(&[with_toilet_bowl(2020), with_toilet_bowl(2021)], &config);

    let dan = records.teams["Dynasty Dan"];
    assert_eq!(dan.toilet_bowl_appearances, 2);
    assert_eq!((dan.toilet_bowl_wins, dan.toilet_bowl_losses), (4, 0));
    assert_eq!(dan.toilet_bowl_titles, 2);
    assert_eq!(dan.toilet_bowl_win_pct(), Some(100.0));

    let blitz = records.teams["Blitz"];
    assert_eq!((blitz.toilet_bowl_wins, blitz.toilet_bowl_losses), (0, 4));
    assert_eq!(blitz.last_place_finishes, 2);
    assert_eq!(blitz.toilet_bowl_win_pct(), Some(0.0));

    // playoff teams never enter the toilet bowl
    assert_eq!(records.teams["Gridiron Gus"].toilet_bowl_appearances, 0);
}

#[test]
fn test_points_per_start() {
    let seasons = vec![season(2019, 0, 1)];
    let records = aggregate_seasons(&seasons, &config());
    let best = &records.best_pickups[0];
    assert_eq!(best.starts, 1);
    assert_eq!(best.points_per_start(), Some(39.0));

    let benched = PickupRecord {
        starts: 0,
        ..best.clone()
    };
    assert_eq!(benched.points_per_start(), None);
}

fn with_trade(year: u16) -> SeasonData {
    let mut data = season(year, 0, 1);
    data.transactions.push(Transaction {
        transaction_id: format!("trade-{}", year),
        season: Season::new(year),
        week: Week::new(2),
        kind: TransactionKind::Trade,
        adds: [
            (PlayerId::from("100"), RosterId::new(1)),
            (PlayerId::from("200"), RosterId::new(2)),
        ]
        .into_iter()
        .collect(),
        drops: [
            (PlayerId::from("100"), RosterId::new(2)),
            (PlayerId::from("200"), RosterId::new(1)),
        ]
        .into_iter()
        .collect(),
        waiver_bid: None,
        roster_ids: vec![RosterId::new(1), RosterId::new(2)],
    });
    data
}

#[test]
fn test_most_lopsided_trades_leaderboard() {
    let seasons: Vec<SeasonData> = (2015..=2018).map(with_trade).collect();
    let records = aggregate_seasons(&seasons, &config());

    let gaps: Vec<f64> = records.most_lopsided_trades.iter().map(|t| t.gap).collect();
    assert_eq!(gaps, vec![36.0, 35.0, 34.0]);

    let top = &records.most_lopsided_trades[0];
    assert_eq!(top.season, Season::new(2018));
    assert_eq!(top.winner, "Gridiron Gus");
    assert_eq!(top.winner_points, 38.0);
    assert_eq!(top.loser, "Mickey V");
    assert_eq!(top.loser_points, 2.0);
    assert!(!top.fair);
}

#[test]
fn test_lopsided_trades_merge_in_any_order() {
    let size = config().leaderboard_size;
    let partials: Vec<LeagueRecords> = [with_trade(2016), with_trade(2019), with_trade(2017)]
        .iter()
        .map(|d| LeagueRecords::from_summary(&summarize_season(d, &config()), size))
        .collect();

    let forward = partials
        .iter()
        .cloned()
        .fold(LeagueRecords::empty(size), LeagueRecords::merge);
    let backward = partials
        .iter()
        .rev()
        .cloned()
        .fold(LeagueRecords::empty(size), LeagueRecords::merge);

    assert_eq!(forward.most_lopsided_trades, backward.most_lopsided_trades);
    assert_eq!(forward.most_lopsided_trades[0].season, Season::new(2019));
}
