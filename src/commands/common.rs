//! Shared helpers for the command handlers.

use std::path::PathBuf;

use tracing::info;

use crate::{
    cli::GlobalOpts,
    core::config::LeagueConfig,
    league::{bracket::BracketNode, models::SeasonData, seeds::Seed},
    sleeper::{load_or_fetch_season, load_snapshot, FetchOptions},
    LeagueId, Result, RosterId, Season,
};

/// Context containing common resources needed by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: LeagueConfig,
    pub data_dir: Option<PathBuf>,
}

impl CommandContext {
    /// Load the league config named by the global options.
    pub fn new(global: &GlobalOpts) -> Result<Self> {
        let config = LeagueConfig::load(global.config.as_deref())?;
        Ok(Self::with_config(config, global.data_dir.clone()))
    }

    pub fn with_config(config: LeagueConfig, data_dir: Option<PathBuf>) -> Self {
        Self { config, data_dir }
    }

    /// League id for a season: the CLI override, else the config table.
    pub fn resolve_league_id(&self, league_id: Option<LeagueId>, season: Season) -> Result<LeagueId> {
        match league_id {
            Some(id) => Ok(id),
            None => self.config.league_id(season),
        }
    }

    /// Load a season from its snapshot, fetching it on a miss. A stored
    /// snapshot does not need a configured league id.
    pub async fn load_season(&self, season: Season) -> Result<SeasonData> {
        if let Ok(Some(data)) = load_snapshot(self.data_dir.as_deref(), season) {
            return Ok(data);
        }
        let league_id = self.resolve_league_id(None, season)?;
        let options = FetchOptions {
            data_dir: self.data_dir.as_deref(),
            ..Default::default()
        };
        info!(%season, "loading season");
        load_or_fetch_season(season, &league_id, &self.config, &options).await
    }
}

/// Team label with its seed, e.g. `(3) Air Raid`.
pub fn seeded_name(data: &SeasonData, seed: Option<Seed>, roster: Option<RosterId>) -> String {
    match (seed, roster) {
        (Some(seed), Some(roster)) => format!("({}) {}", seed, data.team_name(roster)),
        (None, Some(roster)) => data.team_name(roster),
        (_, None) => "BYE".to_string(),
    }
}

/// One text line for a bracket game.
pub fn format_node(data: &SeasonData, node: &BracketNode) -> String {
    let team1 = seeded_name(data, node.team1_seed, node.team1);
    let team2 = seeded_name(data, node.team2_seed, node.team2);
    match node.winner {
        Some(winner) => format!("{} vs {} -> {}", team1, team2, data.team_name(winner)),
        None if node.is_bye() => format!("{} (bye)", team1),
        None => format!("{} vs {} -> TBD", team1, team2),
    }
}

/// Format a points value the way every table prints it.
pub fn points(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}
