//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::{LeagueId, Season};

use crate::league::models::TransactionClass;

/// Global options shared by every command
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (or set `LEAGUE_HISTORY_CONFIG`).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for season snapshots (defaults to the user cache dir).
    #[clap(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Debug logging on stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download a season from Sleeper and store it as a snapshot
    Fetch {
        /// Season year (e.g. 2024).
        #[clap(long, short)]
        season: Season,

        /// League ID, overriding the config table for this season.
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Ignore an existing snapshot and fetch again.
        #[clap(long)]
        refresh: bool,

        /// Also download the full NFL player catalog for player names.
        #[clap(long)]
        with_players: bool,
    },

    /// Show the playoff bracket and both consolation tiers of a season
    Bracket {
        /// Season year (e.g. 2024).
        #[clap(long, short)]
        season: Season,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Value the pickups and trades of a season
    Transactions {
        /// Season year (e.g. 2024).
        #[clap(long, short)]
        season: Season,

        /// Only show one kind of transaction.
        #[clap(long, value_enum)]
        kind: Option<TransactionClass>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// All-time records across seasons
    Records {
        /// Seasons to include (repeatable); defaults to every configured season.
        #[clap(long = "season", short)]
        seasons: Vec<Season>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "league-history",
    about = "Fantasy league history: brackets, toilet bowls and transaction values"
)]
pub struct LeagueHistory {
    #[clap(flatten)]
    pub global: GlobalOpts,

    #[clap(subcommand)]
    pub command: Commands,
}
