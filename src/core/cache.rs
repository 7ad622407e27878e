//! On-disk locations and small file helpers for season snapshots.
//!
//! Snapshots live under the user cache directory unless a data directory is
//! passed explicitly:
//!
//! - `~/.cache/league-history/season-<year>.json`

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use crate::cli::types::Season;

const APP_DIR: &str = "league-history";

fn base_cache_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    })
}

/// Default directory holding season snapshots.
pub fn default_data_dir() -> PathBuf {
    base_cache_dir().join(APP_DIR)
}

/// Path: <data_dir>/season-{season}.json
pub fn season_snapshot_path(data_dir: Option<&Path>, season: Season) -> PathBuf {
    let dir = data_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(default_data_dir);
    dir.join(format!("season-{}.json", season.as_u16()))
}

/// Default config file: <config_dir>/league-history/config.json
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".config");
        home
    });
    base.join(APP_DIR).join("config.json")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}
