//! Integration tests for stored snapshots and all-time records

use league_history::{
    commands::CommandContext,
    core::LeagueConfig,
    league::{
        aggregate_seasons,
        models::{BracketRecord, Roster},
    },
    sleeper::{load_snapshot, save_snapshot},
    LeagueError, RosterId, Season, SeasonData,
};
use tempfile::tempdir;

const TEAMS: [&str; 4] = ["Gridiron Gus", "Mickey V", "Air Raid", "Bench Mob"];

fn game(round: u8, t1: u32, t2: u32, winner: u32) -> BracketRecord {
    BracketRecord {
        round,
        team1: Some(RosterId::new(t1)),
        team2: Some(RosterId::new(t2)),
        winner: Some(RosterId::new(winner)),
        loser: Some(RosterId::new(if winner == t1 { t2 } else { t1 })),
        ..Default::default()
    }
}

/// Four teams, all in the playoffs; `finish` lists roster ids best seed first.
fn season(year: u16, finish: [u32; 4], champion: u32) -> SeasonData {
    let rosters = finish
        .iter()
        .enumerate()
        .map(|(rank, id)| Roster {
            roster_id: RosterId::new(*id),
            owner_id: None,
            team_name: TEAMS[*id as usize - 1].to_string(),
            season: Season::new(year),
            wins: 10 - rank as u32,
            losses: 4 + rank as u32,
            ties: 0,
            points_for: 1400.0,
        })
        .collect();
    let [s1, s2, s3, s4] = finish;
    let top = if champion == s4 { s4 } else { s1 };
    let bottom = if champion == s3 { s3 } else { s2 };
    SeasonData {
        season: Season::new(year),
        playoff_teams: Some(4),
        rosters,
        winners_bracket: vec![
            game(1, s1, s4, top),
            game(1, s2, s3, bottom),
            game(2, top, bottom, champion),
        ],
        ..Default::default()
    }
}

#[test]
fn test_snapshots_round_trip_on_disk() {
    let dir = tempdir().unwrap();
    let data = season(2020, [1, 2, 3, 4], 2);

    save_snapshot(Some(dir.path()), &data).unwrap();
    let loaded = load_snapshot(Some(dir.path()), Season::new(2020)).unwrap();
    assert_eq!(loaded, Some(data));
    assert_eq!(load_snapshot(Some(dir.path()), Season::new(2019)).unwrap(), None);
}

#[test]
fn test_records_across_stored_seasons() {
    let seasons = vec![
        season(2020, [1, 2, 3, 4], 1),
        season(2021, [3, 1, 4, 2], 3),
        season(2022, [2, 3, 1, 4], 2),
    ];
    let records = aggregate_seasons(&seasons, &LeagueConfig::default());

    assert_eq!(records.seasons.len(), 3);
    assert!(records.skipped.is_empty());
    for team in TEAMS {
        assert_eq!(records.teams[team].seasons, 3);
        assert_eq!(records.teams[team].playoff_appearances, 3);
    }
    assert_eq!(records.teams["Gridiron Gus"].championships, 1);
    assert_eq!(records.teams["Mickey V"].championships, 1);
    assert_eq!(records.teams["Air Raid"].championships, 1);
    assert_eq!(records.teams["Bench Mob"].championships, 0);

    let titles: u32 = records.teams.values().map(|t| t.championships).sum();
    let runner_ups: u32 = records.teams.values().map(|t| t.runner_ups).sum();
    assert_eq!(titles, 3);
    assert_eq!(runner_ups, 3);

    let wins: u32 = records.teams.values().map(|t| t.playoff_wins).sum();
    let losses: u32 = records.teams.values().map(|t| t.playoff_losses).sum();
    assert_eq!(wins, 9);
    assert_eq!(wins, losses);
}

#[test]
fn test_aggregation_is_order_independent() {
    let seasons = vec![
        season(2020, [1, 2, 3, 4], 1),
        season(2021, [3, 1, 4, 2], 3),
        season(2022, [2, 3, 1, 4], 4),
    ];
    let mut reversed = seasons.clone();
    reversed.reverse();

    let config = LeagueConfig::default();
    assert_eq!(
        aggregate_seasons(&seasons, &config),
        aggregate_seasons(&reversed, &config)
    );
}

#[tokio::test]
async fn test_missing_season_needs_a_league_id() {
    let dir = tempdir().unwrap();
    let ctx = CommandContext::with_config(LeagueConfig::default(), Some(dir.path().to_path_buf()));

    match ctx.load_season(Season::new(2018)).await {
        Err(LeagueError::MissingLeagueId { season }) => assert_eq!(season, 2018),
        other => panic!("expected MissingLeagueId, got {other:?}"),
    }
}

#[tokio::test]
async fn test_context_loads_stored_season() {
    let dir = tempdir().unwrap();
    save_snapshot(Some(dir.path()), &season(2021, [3, 1, 4, 2], 3)).unwrap();
    let ctx = CommandContext::with_config(LeagueConfig::default(), Some(dir.path().to_path_buf()));

    let data = ctx.load_season(Season::new(2021)).await.unwrap();
    assert_eq!(data.team_name(RosterId::new(3)), "Air Raid");
}
