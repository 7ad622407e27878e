//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use league_history::{
    cli::{Commands, LeagueHistory},
    commands::{
        bracket::handle_bracket, fetch::handle_fetch, records::handle_records,
        transactions::handle_transactions, CommandContext,
    },
    core::logging::init_tracing,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = LeagueHistory::parse();
    init_tracing(app.global.verbose)?;

    let ctx = CommandContext::new(&app.global)?;

    match app.command {
        Commands::Fetch {
            season,
            league_id,
            refresh,
            with_players,
        } => handle_fetch(&ctx, season, league_id, refresh, with_players).await?,

        Commands::Bracket { season, json } => handle_bracket(&ctx, season, json).await?,

        Commands::Transactions { season, kind, json } => {
            handle_transactions(&ctx, season, kind, json).await?
        }

        Commands::Records { seasons, json } => handle_records(&ctx, seasons, json).await?,
    }

    Ok(())
}
