//! Entry point: parse CLI, load settings, and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use nfl_stats_hub::{
    cli::{Cli, Commands},
    commands::{
        leaders::handle_leaders, standings::handle_standings, watch::handle_watch,
    },
    config::Settings,
    logging,
};

/// Run the CLI.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    // Keeps the file writer flushing until exit
    let _log_guard = logging::init(&settings).context("initializing logging")?;

    match cli.command {
        Commands::Standings { common } => handle_standings(&settings, common)?,

        Commands::Leaders {
            common,
            category,
            limit,
            team,
        } => handle_leaders(&settings, common, category, limit, team)?,

        Commands::Watch {
            season,
            category,
            updates,
        } => handle_watch(&settings, season, category, updates)?,
    }

    Ok(())
}
