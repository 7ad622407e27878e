//! Error types for the league history CLI

use thiserror::Error;


pub type Result<T> = std::result::Result<T, LeagueError>;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("No league ID configured for season {season}")]
    MissingLeagueId { season: u16 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("No data available for season {season}")]
    NoData { season: u16 },

    #[error("Unsupported bracket shape: {field_size} teams (expected 4 or 8)")]
    UnsupportedBracket { field_size: usize },

    #[error("Snapshot error: {message}")]
    Snapshot { message: String },
}
