//! League configuration (`config.json`).
//!
//! Everything that used to be hard-wired per league lives here: the season to
//! league-id table, the playoff field size, the consolation tier seed ranges
//! and team name aliases. Every field has a default, so a missing file or a
//! partial one is fine.

use crate::cli::types::{LeagueId, Season, Week};
use crate::core::cache::{default_config_path, try_read_to_string};
use crate::error::{LeagueError, Result};
use crate::league::seeds::Seed;
use crate::CONFIG_ENV_VAR;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    /// Season year → external league id.
    pub leagues: BTreeMap<u16, LeagueId>,
    pub playoff_teams: usize,
    pub middle_tier: [Seed; 2],
    pub lower_tier: [Seed; 2],
    /// Final week of the fantasy season.
    pub last_week: u16,
    pub leaderboard_size: usize,
    /// Raw display name → preferred team name.
    pub team_aliases: BTreeMap<String, String>,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            leagues: BTreeMap::new(),
            playoff_teams: 8,
            middle_tier: [5, 8],
            lower_tier: [9, 12],
            last_week: 17,
            leaderboard_size: 10,
            team_aliases: BTreeMap::new(),
        }
    }
}

impl LeagueConfig {
    /// Load configuration.
    ///
    /// An explicit path (or `LEAGUE_HISTORY_CONFIG`) must exist. The default
    /// location is optional and falls back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path),
            None => {
                let path = default_config_path();
                match try_read_to_string(&path) {
                    Some(contents) => Self::from_json(&contents),
                    None => {
                        debug!(path = %path.display(), "no config file, using defaults");
                        Ok(Self::default())
                    }
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| LeagueError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, [lo, hi]) in [("middle_tier", self.middle_tier), ("lower_tier", self.lower_tier)] {
            if lo == 0 || lo > hi {
                return Err(LeagueError::Config {
                    message: format!("{name} must be a seed range [lo, hi] with 1 <= lo <= hi"),
                });
            }
        }
        let middle = self.middle_range();
        let lower = self.lower_range();
        if middle.contains(lower.start()) || lower.contains(middle.start()) {
            return Err(LeagueError::Config {
                message: "middle_tier and lower_tier must not overlap".to_string(),
            });
        }
        if self.last_week == 0 {
            return Err(LeagueError::Config {
                message: "last_week must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn league_id(&self, season: Season) -> Result<LeagueId> {
        self.leagues
            .get(&season.as_u16())
            .cloned()
            .ok_or(LeagueError::MissingLeagueId {
                season: season.as_u16(),
            })
    }

    /// Seasons with a configured league id, oldest first.
    pub fn seasons(&self) -> Vec<Season> {
        self.leagues.keys().copied().map(Season::new).collect()
    }

    /// Apply the alias table (case-insensitive) to a raw team name.
    pub fn normalize_team_name(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        self.team_aliases
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(trimmed))
            .map(|(_, name)| name.clone())
            .unwrap_or_else(|| trimmed.to_string())
    }

    pub fn middle_range(&self) -> RangeInclusive<Seed> {
        self.middle_tier[0]..=self.middle_tier[1]
    }

    pub fn lower_range(&self) -> RangeInclusive<Seed> {
        self.lower_tier[0]..=self.lower_tier[1]
    }

    pub fn last_week(&self) -> Week {
        Week::new(self.last_week)
    }
}
