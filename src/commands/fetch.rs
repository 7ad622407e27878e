//! Fetch command implementation

use tracing::info;

use crate::{
    core::season_snapshot_path,
    sleeper::{load_or_fetch_season, FetchOptions},
    LeagueId, Result, Season,
};

use super::common::CommandContext;

/// Handle the fetch command
pub async fn handle_fetch(
    ctx: &CommandContext,
    season: Season,
    league_id: Option<LeagueId>,
    refresh: bool,
    with_players: bool,
) -> Result<()> {
    let league_id = ctx.resolve_league_id(league_id, season)?;

    if refresh {
        println!("Fetching season {} from Sleeper...", season);
    } else {
        println!("Loading season {} (snapshot if available)...", season);
    }

    let options = FetchOptions {
        data_dir: ctx.data_dir.as_deref(),
        refresh,
        with_players,
    };
    // tarpaulin::skip - HTTP/file I/O call, tested via integration tests
    let data = load_or_fetch_season(season, &league_id, &ctx.config, &options).await?;
    info!(%season, %league_id, "season ready");

    let path = season_snapshot_path(ctx.data_dir.as_deref(), season);
    println!("✓ Season {} stored at {}", season, path.display());
    println!(
        "  {} rosters, {} matchups, {} transactions, {} players",
        data.rosters.len(),
        data.matchups.len(),
        data.transactions.len(),
        data.players.len()
    );
    if let Some(week) = data.last_week() {
        println!("  Matchups through week {}", week);
    }

    Ok(())
}
