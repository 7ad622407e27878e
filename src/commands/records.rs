//! Records command implementation

use tracing::warn;

use crate::{
    error::LeagueError,
    league::aggregate::{aggregate_seasons, LeagueRecords, PickupRecord, TradeRecord},
    Result, Season,
};

use super::common::{points, CommandContext};

/// Handle the records command
pub async fn handle_records(ctx: &CommandContext, seasons: Vec<Season>, json: bool) -> Result<()> {
    let seasons = if seasons.is_empty() {
        ctx.config.seasons()
    } else {
        seasons
    };
    if seasons.is_empty() {
        return Err(LeagueError::Config {
            message: "no seasons given and none configured under \"leagues\"".to_string(),
        });
    }

    let mut loaded = Vec::with_capacity(seasons.len());
    let mut failed = Vec::new();
    for season in seasons {
        // tarpaulin::skip - HTTP/file I/O call, tested via integration tests
        match ctx.load_season(season).await {
            Ok(data) => loaded.push(data),
            Err(e) => {
                warn!(%season, error = %e, "skipping season");
                failed.push(season);
            }
        }
    }

    let mut records = aggregate_seasons(&loaded, &ctx.config);
    for season in failed {
        records.mark_skipped(season);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for line in render_records(&records) {
        println!("{}", line);
    }
    Ok(())
}

fn render_pickup(rank: usize, pickup: &PickupRecord) -> String {
    let bid = pickup
        .waiver_bid
        .map(|bid| format!(" (${})", bid))
        .unwrap_or_default();
    format!(
        "  {:>2}. {} week {}: {} to {}{}, {} pts in {} starts ({} per start)",
        rank + 1,
        pickup.season,
        pickup.week,
        pickup.player_name,
        pickup.team_name,
        bid,
        points(Some(pickup.lineup_points)),
        pickup.starts,
        points(pickup.points_per_start())
    )
}

fn render_trade(rank: usize, trade: &TradeRecord) -> String {
    format!(
        "  {:>2}. {} week {}: {} {} over {} {}, by {}",
        rank + 1,
        trade.season,
        trade.week,
        trade.winner,
        points(Some(trade.winner_points)),
        trade.loser,
        points(Some(trade.loser_points)),
        points(Some(trade.gap))
    )
}

fn pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "-".to_string())
}

/// Text lines for all-time records.
pub fn render_records(records: &LeagueRecords) -> Vec<String> {
    let span = match (records.seasons.first(), records.seasons.last()) {
        (Some(first), Some(last)) => format!("{}-{}", first, last),
        _ => "no seasons".to_string(),
    };
    let mut lines = vec![format!("League records ({})", span)];

    let mut teams: Vec<_> = records.teams.iter().collect();
    teams.sort_by(|(a_name, a), (b_name, b)| {
        b.championships
            .cmp(&a.championships)
            .then_with(|| b.playoff_wins.cmp(&a.playoff_wins))
            .then_with(|| a_name.cmp(b_name))
    });

    lines.push(format!(
        "  {:<24} {:>4} {:>6} {:>6} {:>7} {:>6} {:>6} {:>5} {:>6} {:>6} {:>5} {:>5}",
        "Team", "Yrs", "Titles", "2nd", "Playoff", "W-L", "Win%", "Bowl", "W-L", "Win%", "Won",
        "Last"
    ));
    for (name, team) in teams {
        lines.push(format!(
            "  {:<24} {:>4} {:>6} {:>6} {:>7} {:>6} {:>6} {:>5} {:>6} {:>6} {:>5} {:>5}",
            name,
            team.seasons,
            team.championships,
            team.runner_ups,
            team.playoff_appearances,
            format!("{}-{}", team.playoff_wins, team.playoff_losses),
            pct(team.playoff_win_pct()),
            team.toilet_bowl_appearances,
            format!("{}-{}", team.toilet_bowl_wins, team.toilet_bowl_losses),
            pct(team.toilet_bowl_win_pct()),
            team.toilet_bowl_titles,
            team.last_place_finishes
        ));
    }

    if !records.best_pickups.is_empty() {
        lines.push("Best pickups".to_string());
        lines.extend(
            records
                .best_pickups
                .iter()
                .enumerate()
                .map(|(rank, p)| render_pickup(rank, p)),
        );
    }
    if !records.worst_waiver_claims.is_empty() {
        lines.push("Worst waiver claims".to_string());
        lines.extend(
            records
                .worst_waiver_claims
                .iter()
                .enumerate()
                .map(|(rank, p)| render_pickup(rank, p)),
        );
    }
    if !records.most_lopsided_trades.is_empty() {
        lines.push("Most lopsided trades".to_string());
        lines.extend(
            records
                .most_lopsided_trades
                .iter()
                .enumerate()
                .map(|(rank, t)| render_trade(rank, t)),
        );
    }
    if !records.skipped.is_empty() {
        let skipped: Vec<String> = records.skipped.iter().map(ToString::to_string).collect();
        lines.push(format!(
            "Playoff totals exclude seasons: {}",
            skipped.join(", ")
        ));
    }
    lines
}
