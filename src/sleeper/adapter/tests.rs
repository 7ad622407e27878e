//! Unit tests for Sleeper payload conversion

use super::*;
use crate::league::models::TransactionClass;
use serde_json::json;

fn raw_season() -> RawSeason {
    let users: Vec<RawUser> = serde_json::from_value(json!([
        {"user_id": "u1", "display_name": "mikey_v", "username": "mikeyv"},
        {"user_id": "u2", "display_name": "", "username": "gridiron_gus"}
    ]))
    .unwrap();

    let rosters: Vec<RawRoster> = serde_json::from_value(json!([
        {"roster_id": 1, "owner_id": "u1",
         "settings": {"wins": 9, "losses": 5, "ties": 0, "fpts": 1612, "fpts_decimal": 48}},
        {"roster_id": 2, "owner_id": "u2",
         "settings": {"wins": 5, "losses": 9, "fpts": 1390}},
        {"roster_id": 3, "owner_id": null, "settings": {}}
    ]))
    .unwrap();

    let week_one: Vec<RawMatchup> = serde_json::from_value(json!([
        {"roster_id": 1, "matchup_id": 4, "points": 121.3,
         "starters": ["4046", "0", "IND"],
         "players": ["4046", "IND", "6794"],
         "players_points": {"4046": 24.1, "IND": 7.0, "6794": 11.2}},
        {"roster_id": 2, "matchup_id": 4, "points": 98.6,
         "starters": ["4984"], "players_points": {"4984": 18.0}},
        {"roster_id": 3, "matchup_id": null, "points": 0.0}
    ]))
    .unwrap();

    let transactions: Vec<RawTransaction> = serde_json::from_value(json!([
        {"transaction_id": "901", "type": "waiver", "status": "complete", "leg": 2,
         "adds": {"6794": 1}, "drops": {"5012": 1}, "settings": {"waiver_bid": 17}},
        {"transaction_id": "902", "type": "free_agent", "status": "failed",
         "adds": {"7000": 2}},
        {"transaction_id": "903", "type": "trade", "status": "complete",
         "adds": {"4046": 2, "4984": 1}, "drops": {"4046": 1, "4984": 2},
         "roster_ids": [1, 2, 3], "settings": null},
        {"transaction_id": "904", "type": "draft_pick_swap", "status": "complete"}
    ]))
    .unwrap();

    let bracket: Vec<RawBracketMatchup> = serde_json::from_value(json!([
        {"r": 1, "m": 1, "t1": 1, "t2": 2, "w": 1, "l": 2},
        {"r": 2, "m": 3, "t1": null, "t2": null, "t1_from": {"w": 1}, "t2_from": {"w": 2}},
        {"r": 2, "m": 4, "t1": 2, "t2": 3, "w": 3, "l": 2, "p": 3}
    ]))
    .unwrap();

    RawSeason {
        league: serde_json::from_value(json!({
            "league_id": "991234567890123456",
            "season": "2023",
            "settings": {"playoff_teams": 6}
        }))
        .unwrap(),
        users,
        rosters,
        matchups: vec![(1, week_one)],
        winners_bracket: bracket,
        losers_bracket: Vec::new(),
        transactions: vec![(1, transactions)],
        players: None,
    }
}

fn convert(raw: &RawSeason, config: &LeagueConfig) -> SeasonData {
    convert_season(
        raw,
        Season::new(2023),
        LeagueId::new("991234567890123456"),
        config,
    )
}

#[test]
fn test_rosters_and_team_names() {
    let config = LeagueConfig::from_json(r#"{"team_aliases": {"MIKEY_V": "Mickey V"}}"#).unwrap();
    let season = convert(&raw_season(), &config);

    assert_eq!(season.rosters.len(), 3);
    assert_eq!(season.team_name(RosterId::new(1)), "Mickey V");
    assert_eq!(season.team_name(RosterId::new(2)), "gridiron_gus");
    assert_eq!(season.team_name(RosterId::new(3)), "Team 3");
    assert!((season.rosters[0].points_for - 1612.48).abs() < 1e-9);
    assert_eq!(season.rosters[1].ties, 0);
    assert_eq!(season.playoff_teams, Some(6));
}

#[test]
fn test_matchups_are_paired_and_byes_kept() {
    let season = convert(&raw_season(), &LeagueConfig::default());

    assert_eq!(season.matchups.len(), 2);
    let bye = season.matchups.iter().find(|m| m.away.is_none()).unwrap();
    assert_eq!(bye.home.roster_id, RosterId::new(3));

    let game = season.matchups.iter().find(|m| m.away.is_some()).unwrap();
    assert_eq!(game.matchup_id, Some(4));
    assert_eq!(game.winner(), Some(RosterId::new(1)));
    // the empty "0" slot is not a starter
    assert_eq!(
        game.home.starters,
        vec![PlayerId::new("4046"), PlayerId::new("IND")]
    );
}

#[test]
fn test_transactions_filtered_and_classified() {
    let season = convert(&raw_season(), &LeagueConfig::default());

    let ids: Vec<&str> = season
        .transactions
        .iter()
        .map(|t| t.transaction_id.as_str())
        .collect();
    assert_eq!(ids, vec!["901", "903"]);

    let waiver = &season.transactions[0];
    assert_eq!(waiver.week, Week::new(2));
    assert_eq!(waiver.waiver_bid, Some(17));
    assert_eq!(waiver.class(), TransactionClass::Waiver);
    assert_eq!(waiver.roster_id(), Some(RosterId::new(1)));

    let trade = &season.transactions[1];
    assert_eq!(trade.week, Week::new(1));
    assert_eq!(trade.class(), TransactionClass::Trade);
    // roster 3 only sent a draft pick
    assert_eq!(
        trade.roster_ids,
        vec![RosterId::new(1), RosterId::new(2), RosterId::new(3)]
    );
    assert_eq!(trade.rosters().len(), 3);
}

#[test]
fn test_bracket_rows_keep_nulls() {
    let season = convert(&raw_season(), &LeagueConfig::default());

    assert_eq!(season.winners_bracket.len(), 3);
    assert_eq!(season.winners_bracket[1].team1, None);
    assert_eq!(season.winners_bracket[2].placement, Some(3));
    assert_eq!(season.winners_bracket[0].loser, Some(RosterId::new(2)));
}

#[test]
fn test_catalog_from_lineups_without_player_list() {
    let season = convert(&raw_season(), &LeagueConfig::default());

    assert!(season.players.resolve(&PlayerId::new("6794")).is_some());
    assert!(season.players.resolve(&PlayerId::new("IND")).is_some());
    // only seen in a drop
    assert!(season.players.resolve(&PlayerId::new("5012")).is_none());
}

#[test]
fn test_catalog_from_player_list() {
    let mut raw = raw_season();
    raw.players = Some(
        serde_json::from_value(json!({
            "4046": {"full_name": "Patrick Mahomes", "position": "QB"},
            "5012": {"first_name": "Mark", "last_name": "Andrews", "position": "TE"},
            "9999": {"full_name": "Not Rostered"}
        }))
        .unwrap(),
    );

    let season = convert(&raw, &LeagueConfig::default());

    let qb = season.players.resolve(&PlayerId::new("4046")).unwrap();
    assert_eq!(qb.name, "Patrick Mahomes");
    assert_eq!(qb.position.as_deref(), Some("QB"));
    assert_eq!(
        season.players.resolve(&PlayerId::new("5012")).unwrap().name,
        "Mark Andrews"
    );
    assert!(season.players.resolve(&PlayerId::new("9999")).is_none());
}
