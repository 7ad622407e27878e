use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::cli::types::{LeagueId, Week};
use crate::sleeper::types::{
    RawBracketMatchup, RawLeague, RawMatchup, RawPlayer, RawRoster, RawSeason, RawTransaction,
    RawUser,
};
use crate::Result;

/// Base path for the Sleeper v1 API.
pub const SLEEPER_BASE_URL: &str = "https://api.sleeper.app/v1";

pub fn build_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(concat!("league-history/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

pub fn endpoint_url(path: &str) -> String {
    format!("{}/{}", SLEEPER_BASE_URL, path.trim_start_matches('/'))
}

async fn fetch_json<T: DeserializeOwned>(client: &Client, path: &str) -> Result<T> {
    let url = endpoint_url(path);
    debug!(%url, "GET");

    let res = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json::<T>()
        .await?;

    Ok(res)
}

pub async fn get_league(client: &Client, league_id: &LeagueId) -> Result<RawLeague> {
    fetch_json(client, &format!("league/{}", league_id)).await
}

pub async fn get_users(client: &Client, league_id: &LeagueId) -> Result<Vec<RawUser>> {
    fetch_json(client, &format!("league/{}/users", league_id)).await
}

pub async fn get_rosters(client: &Client, league_id: &LeagueId) -> Result<Vec<RawRoster>> {
    fetch_json(client, &format!("league/{}/rosters", league_id)).await
}

pub async fn get_matchups(
    client: &Client,
    league_id: &LeagueId,
    week: Week,
) -> Result<Vec<RawMatchup>> {
    fetch_json(client, &format!("league/{}/matchups/{}", league_id, week)).await
}

pub async fn get_winners_bracket(
    client: &Client,
    league_id: &LeagueId,
) -> Result<Vec<RawBracketMatchup>> {
    fetch_json(client, &format!("league/{}/winners_bracket", league_id)).await
}

pub async fn get_losers_bracket(
    client: &Client,
    league_id: &LeagueId,
) -> Result<Vec<RawBracketMatchup>> {
    fetch_json(client, &format!("league/{}/losers_bracket", league_id)).await
}

/// The API only serves transactions per week (`/transactions/{week}`).
pub async fn get_transactions(
    client: &Client,
    league_id: &LeagueId,
    week: Week,
) -> Result<Vec<RawTransaction>> {
    fetch_json(client, &format!("league/{}/transactions/{}", league_id, week)).await
}

/// Full NFL player catalog (several megabytes).
pub async fn get_players(client: &Client) -> Result<BTreeMap<String, RawPlayer>> {
    fetch_json(client, "players/nfl").await
}

/// Fetch everything needed for one season.
///
/// League, users and rosters are required. A week of matchups or
/// transactions that fails to load is skipped, and a missing bracket is
/// treated as empty.
pub async fn fetch_raw_season(
    client: &Client,
    league_id: &LeagueId,
    last_week: Week,
    with_players: bool,
) -> Result<RawSeason> {
    let league = get_league(client, league_id).await?;
    let users = get_users(client, league_id).await?;
    let rosters = get_rosters(client, league_id).await?;
    info!(%league_id, rosters = rosters.len(), "fetched league");

    let mut matchups = Vec::new();
    let mut transactions = Vec::new();
    for week in 1..=last_week.as_u16() {
        let week = Week::new(week);
        match get_matchups(client, league_id, week).await {
            Ok(rows) if !rows.is_empty() => matchups.push((week.as_u16(), rows)),
            Ok(_) => debug!(%week, "no matchups"),
            Err(e) => warn!(%week, error = %e, "skipping matchups for week"),
        }
        match get_transactions(client, league_id, week).await {
            Ok(rows) => transactions.push((week.as_u16(), rows)),
            Err(e) => warn!(%week, error = %e, "skipping transactions for week"),
        }
    }

    let winners_bracket = get_winners_bracket(client, league_id)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "winners bracket unavailable");
            Vec::new()
        });
    let losers_bracket = get_losers_bracket(client, league_id)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "losers bracket unavailable");
            Vec::new()
        });

    let players = if with_players {
        Some(get_players(client).await?)
    } else {
        None
    };

    Ok(RawSeason {
        league,
        users,
        rosters,
        matchups,
        winners_bracket,
        losers_bracket,
        transactions,
        players,
    })
}
