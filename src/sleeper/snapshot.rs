// src/sleeper/snapshot.rs
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::{config::LeagueConfig, season_snapshot_path, try_read_to_string, write_string};
use crate::error::LeagueError;
use crate::league::models::SeasonData;
use crate::sleeper::{adapter::convert_season, http};
use crate::{LeagueId, Result, Season};

/// Read a stored season snapshot. `Ok(None)` when there is no file.
pub fn load_snapshot(data_dir: Option<&Path>, season: Season) -> Result<Option<SeasonData>> {
    let path = season_snapshot_path(data_dir, season);
    let Some(contents) = try_read_to_string(&path) else {
        return Ok(None);
    };
    let data: SeasonData = serde_json::from_str(&contents).map_err(|e| LeagueError::Snapshot {
        message: format!("{}: {}", path.display(), e),
    })?;
    if data.season != season {
        return Err(LeagueError::Snapshot {
            message: format!(
                "{} holds season {}, expected {}",
                path.display(),
                data.season,
                season
            ),
        });
    }
    Ok(Some(data))
}

/// Write a season snapshot and return its path.
pub fn save_snapshot(data_dir: Option<&Path>, data: &SeasonData) -> Result<PathBuf> {
    let path = season_snapshot_path(data_dir, data.season);
    let json = serde_json::to_string_pretty(data)?;
    write_string(&path, &json)?;
    Ok(path)
}

/// Options for [`load_or_fetch_season`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions<'a> {
    pub data_dir: Option<&'a Path>,
    /// Ignore any stored snapshot.
    pub refresh: bool,
    /// Download the full player catalog for real player names.
    pub with_players: bool,
}

/// Try the stored snapshot first. If missing, unreadable or `refresh` is set,
/// fetch the season from Sleeper, convert it and re-write the snapshot.
pub async fn load_or_fetch_season(
    season: Season,
    league_id: &LeagueId,
    config: &LeagueConfig,
    options: &FetchOptions<'_>,
) -> Result<SeasonData> {
    // 1) Try the snapshot (unless refresh)
    if !options.refresh {
        match load_snapshot(options.data_dir, season) {
            Ok(Some(data)) => {
                debug!(%season, "loaded season snapshot");
                return Ok(data);
            }
            Ok(None) => {}
            Err(e) => warn!(%season, error = %e, "ignoring unreadable snapshot"),
        }
    }

    // 2) Fetch from the API
    info!(%season, %league_id, "fetching season from Sleeper");
    let client = http::build_client()?;
    let raw = http::fetch_raw_season(&client, league_id, config.last_week(), options.with_players)
        .await?;
    let data = convert_season(&raw, season, league_id.clone(), config);
    if data.rosters.is_empty() {
        return Err(LeagueError::NoData {
            season: season.as_u16(),
        });
    }

    // 3) Write the snapshot; a failed write only costs a refetch next time
    if let Err(e) = save_snapshot(options.data_dir, &data) {
        warn!(%season, error = %e, "could not write season snapshot");
    }

    Ok(data)
}
