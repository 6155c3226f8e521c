//! Standings command implementation

use crate::{cli::CommonArgs, config::Settings, Result, StatsError};

use super::common::{build_app, wait_until_idle, DELIVERY_TIMEOUT};
use super::render::{render_standings, render_status};

/// Handle the standings command
pub fn handle_standings(settings: &Settings, args: CommonArgs) -> Result<()> {
    let mut app = build_app(settings)?.with_season(args.season);

    app.request_standings();
    wait_until_idle(&mut app, DELIVERY_TIMEOUT)?;

    let state = app.state();
    eprintln!("{}", render_status(state));
    if state.standings.is_empty() {
        return Err(StatsError::NoData);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state.standings)?); // tarpaulin::skip
    } else {
        print!("{}", render_standings(&state.standings)); // tarpaulin::skip
    }
    Ok(())
}
