//! Bracket command implementation

use crate::{
    league::{
        bracket::{Bracket, BracketSlot},
        consolation::{Consolation, LowerTier, MiddleTier},
        models::SeasonData,
        season::{summarize_season, PlayoffOutcome, SeasonSummary},
    },
    Result, Season,
};

use super::common::{format_node, CommandContext};

/// Handle the bracket command
pub async fn handle_bracket(ctx: &CommandContext, season: Season, json: bool) -> Result<()> {
    // tarpaulin::skip - HTTP/file I/O call, tested via integration tests
    let data = ctx.load_season(season).await?;
    let summary = summarize_season(&data, &ctx.config);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary.playoffs)?);
        return Ok(());
    }

    for line in render_season(&data, &summary) {
        println!("{}", line);
    }
    Ok(())
}

fn render_slot(data: &SeasonData, slot: &BracketSlot) -> String {
    match slot {
        BracketSlot::Matchup(node) => format!("    {}", format_node(data, node)),
        BracketSlot::Unresolved { seeds: (a, b), .. } => {
            format!("    ({}) vs ({}) -> not played", a, b)
        }
    }
}

/// Text lines for a championship-style bracket.
pub fn render_bracket(data: &SeasonData, bracket: &Bracket) -> Vec<String> {
    let mut lines = Vec::new();
    for (round, slots) in bracket.rounds() {
        lines.push(format!("  {}", bracket.round_name(round)));
        lines.extend(slots.iter().map(|slot| render_slot(data, slot)));
    }
    lines
}

fn render_middle(data: &SeasonData, tier: &MiddleTier) -> Vec<String> {
    let seeds = tier.bracket.layout().seeds();
    let mut lines = vec![format!(
        "Placement bracket (seeds {}-{})",
        seeds.start(),
        seeds.end()
    )];
    for (round, slots) in tier.bracket.rounds() {
        lines.push(format!("  {}", tier.placement_label(round)));
        lines.extend(slots.iter().map(|slot| render_slot(data, slot)));
    }
    lines
}

fn render_lower(data: &SeasonData, tier: &LowerTier) -> Vec<String> {
    let mut lines = vec![format!("Toilet bowl (seeds {}-{})", tier.seeds.0, tier.seeds.1)];
    for (name, slots) in tier.display_rounds() {
        lines.push(format!("  {}", name));
        lines.extend(slots.iter().map(|slot| render_slot(data, slot)));
    }
    if let Some(roster) = tier.last_place() {
        lines.push(format!("  Last place: {}", data.team_name(roster)));
    }
    lines
}

fn render_consolation(data: &SeasonData, consolation: &Consolation) -> Vec<String> {
    let mut lines = render_middle(data, &consolation.middle);
    lines.push(String::new());
    lines.extend(render_lower(data, &consolation.lower));
    lines
}

/// Full text report of a season's postseason.
pub fn render_season(data: &SeasonData, summary: &SeasonSummary) -> Vec<String> {
    let mut lines = vec![format!("Season {} playoffs", summary.season)];
    match &summary.playoffs {
        PlayoffOutcome::Unsupported { field_size } => {
            lines.push(format!(
                "  {}-team playoff field is not supported (4 or 8 only)",
                field_size
            ));
        }
        PlayoffOutcome::Resolved(playoffs) => {
            lines.extend(render_bracket(data, &playoffs.championship));
            match &playoffs.champion {
                Some(name) => lines.push(format!("Champion: {}", name)),
                None => lines.push("Champion: TBD".to_string()),
            }
            if let Some(consolation) = &playoffs.consolation {
                lines.push(String::new());
                lines.extend(render_consolation(data, consolation));
            }
        }
    }
    lines
}
