//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{Season, StatCategory};

/// Arguments shared by every data command
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Season year (defaults to last year's season).
    #[clap(long, short, default_value_t = Season::default())]
    pub season: Season,

    /// Output results as JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
#[clap(name = "nfl-stats-hub", about = "NFL standings and statistical leaders")]
pub struct Cli {
    /// Settings file (defaults to `nfl-stats-hub.toml` if present).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Conference and division standings.
    Standings {
        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Top players of one statistical category.
    Leaders {
        #[clap(flatten)]
        common: CommonArgs,

        /// Category, e.g. `passingYards`, `sacks`.
        #[clap(long, short)]
        category: StatCategory,

        /// Number of leaders to fetch (overrides `leaders_limit`).
        #[clap(long, short)]
        limit: Option<usize>,

        /// Only players whose team abbreviation contains this (case-insensitive).
        #[clap(long, short)]
        team: Option<String>,
    },

    /// Keep refreshing the active view and reprint on every update.
    ///
    /// Shows standings unless `--category` is given. Stops after `--updates`
    /// deliveries, or runs until interrupted.
    Watch {
        /// Season year (defaults to last year's season).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Watch a leaders category instead of standings.
        #[clap(long, short)]
        category: Option<StatCategory>,

        /// Exit after this many updates.
        #[clap(long)]
        updates: Option<u64>,
    },
}
