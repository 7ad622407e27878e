//! Transactions command implementation

use serde::Serialize;

use crate::{
    league::{
        models::TransactionClass,
        season::summarize_season,
        transactions::{PickupValue, TradeOutcome, TradeValue},
    },
    Result, Season, Week,
};

use super::common::{points, CommandContext};

/// JSON payload of the transactions command.
#[derive(Debug, Serialize)]
pub struct TransactionReport {
    pub season: Season,
    pub through: Week,
    pub pickups: Vec<PickupValue>,
    pub trades: Vec<TradeValue>,
}

impl TransactionReport {
    /// Keep only one class of transaction.
    pub fn filter(mut self, kind: Option<TransactionClass>) -> Self {
        if let Some(kind) = kind {
            self.pickups.retain(|p| p.class == kind);
            if kind != TransactionClass::Trade {
                self.trades.clear();
            }
        }
        self
    }
}

/// Handle the transactions command
pub async fn handle_transactions(
    ctx: &CommandContext,
    season: Season,
    kind: Option<TransactionClass>,
    json: bool,
) -> Result<()> {
    // tarpaulin::skip - HTTP/file I/O call, tested via integration tests
    let data = ctx.load_season(season).await?;
    let summary = summarize_season(&data, &ctx.config);
    let report = TransactionReport {
        season,
        through: summary.through,
        pickups: summary.pickups,
        trades: summary.trades,
    }
    .filter(kind);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for line in render_report(&report) {
        println!("{}", line);
    }
    Ok(())
}

fn render_pickup(pickup: &PickupValue) -> String {
    let player = pickup
        .player_name
        .clone()
        .unwrap_or_else(|| pickup.player_id.to_string());
    let bid = pickup
        .waiver_bid
        .filter(|bid| *bid > 0)
        .map(|bid| format!(" ${}", bid))
        .unwrap_or_default();
    let value = match pickup.value.value() {
        Some(v) => format!(
            "{} pts in {} starts, {} on bench",
            points(Some(v.lineup_points)),
            v.starts,
            points(Some(v.bench_points))
        ),
        None => "value unavailable".to_string(),
    };
    format!(
        "  Week {:>2}  {:<20} {}{}: {}",
        pickup.week.as_u16(),
        pickup.team_name,
        player,
        bid,
        value
    )
}

fn render_trade(trade: &TradeValue) -> Vec<String> {
    let mut lines = vec![format!(
        "  Week {:>2}  trade {}",
        trade.week.as_u16(),
        trade.transaction_id
    )];
    match &trade.outcome {
        TradeOutcome::Attributed { sides, verdict } => {
            for side in sides {
                let players: Vec<String> = side
                    .received
                    .iter()
                    .map(|p| {
                        p.player_name
                            .clone()
                            .unwrap_or_else(|| p.player_id.to_string())
                    })
                    .collect();
                lines.push(format!(
                    "    {} received {} ({} pts)",
                    side.team_name,
                    players.join(", "),
                    points(side.total.lineup_points())
                ));
            }
            if let Some(verdict) = verdict {
                let fairness = if verdict.fair { "fair" } else { "lopsided" };
                let result = verdict
                    .winner
                    .and_then(|winner| sides.iter().find(|side| side.roster_id == winner))
                    .map(|side| {
                        format!("{} won by {} pts", side.team_name, points(Some(verdict.gap)))
                    })
                    .unwrap_or_else(|| "even".to_string());
                lines.push(format!("    {} ({})", result, fairness));
            }
        }
        TradeOutcome::NotAttributable { rosters } => {
            lines.push(format!("    {}-team trade, not valued", rosters.len()));
        }
    }
    lines
}

/// Text lines for a transaction report.
pub fn render_report(report: &TransactionReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Season {} transactions (values through week {})",
        report.season, report.through
    )];
    if !report.pickups.is_empty() {
        lines.push("Pickups".to_string());
        lines.extend(report.pickups.iter().map(render_pickup));
    }
    if !report.trades.is_empty() {
        lines.push("Trades".to_string());
        lines.extend(report.trades.iter().flat_map(render_trade));
    }
    if report.pickups.is_empty() && report.trades.is_empty() {
        lines.push("No transactions".to_string());
    }
    lines
}
