//! Core utilities for the league history CLI
//!
//! This module consolidates the ambient pieces used across the application:
//! - `cache`: snapshot locations and file helpers
//! - `config`: league configuration file
//! - `logging`: tracing subscriber setup

pub mod cache;
pub mod config;
pub mod logging;

// Re-export commonly used items for convenience
pub use cache::{season_snapshot_path, try_read_to_string, write_string};
pub use config::LeagueConfig;
