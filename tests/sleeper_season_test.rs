//! Integration tests: raw Sleeper payloads through to a season summary

use league_history::{
    core::LeagueConfig,
    league::{models::TransactionClass, summarize_season, Attribution},
    sleeper::{adapter::convert_season, types::*},
    LeagueId, RosterId, Season,
};
use serde_json::{json, Value};

fn parse<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

fn game(r: u8, m: u32, t1: u32, t2: u32, w: u32) -> Value {
    let l = if w == t1 { t2 } else { t1 };
    json!({ "r": r, "m": m, "t1": t1, "t2": t2, "w": w, "l": l })
}

/// Twelve-team league, four-team playoff. Roster N finishes with seed N.
fn raw_season() -> RawSeason {
    let users = (1..=12)
        .map(|i| json!({ "user_id": format!("u{}", i), "display_name": format!("Owner {}", i) }))
        .collect();
    let rosters = (1..=12u32)
        .map(|i| {
            json!({
                "roster_id": i,
                "owner_id": format!("u{}", i),
                "settings": { "wins": 14 - i, "losses": i, "fpts": 1500 - i * 10, "fpts_decimal": 25 }
            })
        })
        .collect();

    RawSeason {
        league: parse(json!({
            "league_id": "998877",
            "season": "2023",
            "settings": { "playoff_teams": 4 }
        })),
        users: parse(Value::Array(users)),
        rosters: parse(Value::Array(rosters)),
        matchups: vec![
            (
                3,
                parse(json!([
                    { "roster_id": 2, "matchup_id": 1, "points": 101.5,
                      "starters": ["4034", "0"], "players_points": { "4034": 20.0 } },
                    { "roster_id": 5, "matchup_id": 1, "points": 88.0,
                      "starters": ["6794"], "players_points": { "6794": 9.5 } }
                ])),
            ),
            (
                4,
                parse(json!([
                    { "roster_id": 2, "matchup_id": 1, "points": 95.0,
                      "starters": [], "players_points": { "4034": 8.0 } },
                    { "roster_id": 5, "matchup_id": 1, "points": 99.0,
                      "starters": [], "players_points": {} }
                ])),
            ),
        ],
        winners_bracket: parse(json!([
            game(1, 1, 1, 4, 1),
            game(1, 2, 2, 3, 3),
            { "r": 2, "m": 3, "t1": 1, "t2": 3, "w": 3, "l": 1, "p": 1 },
            { "r": 2, "m": 4, "t1": 4, "t2": 2, "w": 2, "l": 4, "p": 3 }
        ])),
        losers_bracket: parse(json!([
            game(1, 1, 5, 8, 5),
            game(1, 2, 6, 7, 7),
            game(2, 3, 5, 7, 7),
            game(1, 4, 9, 12, 12),
            game(1, 5, 10, 11, 10),
            game(2, 6, 12, 10, 10),
            game(2, 7, 9, 11, 9)
        ])),
        transactions: vec![(
            2,
            parse(json!([
                { "transaction_id": "101", "type": "waiver", "status": "complete",
                  "adds": { "4034": 2 }, "drops": { "1111": 2 },
                  "settings": { "waiver_bid": 12 } },
                { "transaction_id": "102", "type": "waiver", "status": "failed",
                  "adds": { "4034": 7 }, "settings": { "waiver_bid": 30 } },
                { "transaction_id": "103", "type": "free_agent", "status": "complete",
                  "adds": { "9999": 4 } }
            ])),
        )],
        players: None,
    }
}

fn config() -> LeagueConfig {
    LeagueConfig::from_json(
        r#"{
            "leagues": { "2023": "998877" },
            "playoff_teams": 8,
            "team_aliases": { "owner 3": "Air Raid" }
        }"#,
    )
    .unwrap()
}

#[test]
fn test_convert_season_uses_league_settings_and_aliases() {
    let config = config();
    let data = convert_season(&raw_season(), Season::new(2023), LeagueId::new("998877"), &config);

    assert_eq!(data.playoff_teams, Some(4));
    assert_eq!(data.rosters.len(), 12);
    assert_eq!(data.team_name(RosterId::new(3)), "Air Raid");
    assert_eq!(data.rosters[0].points_for, 1490.25);
    assert_eq!(data.transactions.len(), 2);
    assert_eq!(data.matchups.len(), 2);
}

#[test]
fn test_full_season_summary() {
    let config = config();
    let data = convert_season(&raw_season(), Season::new(2023), LeagueId::new("998877"), &config);
    let summary = summarize_season(&data, &config);

    assert_eq!(summary.first_place.as_deref(), Some("Owner 1"));

    let playoffs = summary.playoffs.completed().expect("season is complete");
    assert_eq!(playoffs.field_size, 4);
    assert_eq!(playoffs.champion.as_deref(), Some("Air Raid"));
    assert_eq!(playoffs.runner_up.as_deref(), Some("Owner 1"));
    assert_eq!(playoffs.toilet_bowl_champion.as_deref(), Some("Owner 10"));
    assert_eq!(playoffs.last_place.as_deref(), Some("Owner 11"));
    // third-place game is not part of the championship path
    assert_eq!(playoffs.championship.round(2).len(), 1);

    let consolation = playoffs.consolation.as_ref().unwrap();
    assert_eq!(consolation.middle.winner(), Some(RosterId::new(7)));
}

#[test]
fn test_pickup_values_from_raw_lineups() {
    let config = config();
    let data = convert_season(&raw_season(), Season::new(2023), LeagueId::new("998877"), &config);
    let summary = summarize_season(&data, &config);

    let claim = summary
        .pickups
        .iter()
        .find(|p| p.transaction_id == "101")
        .unwrap();
    assert_eq!(claim.class, TransactionClass::Waiver);
    assert_eq!(claim.team_name, "Owner 2");
    let value = claim.value.value().unwrap();
    assert_eq!(value.lineup_points, 20.0);
    assert_eq!(value.bench_points, 8.0);
    assert_eq!(value.starts, 1);

    // never appeared in a lineup, so the placeholder catalog cannot name it
    let unknown = summary
        .pickups
        .iter()
        .find(|p| p.transaction_id == "103")
        .unwrap();
    assert_eq!(unknown.class, TransactionClass::FreeAgent);
    assert_eq!(unknown.value, Attribution::Unavailable);
}
