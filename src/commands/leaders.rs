//! Leaders command implementation

use crate::{
    app::View, cli::CommonArgs, config::Settings, core::filters::players_by_team, Result,
    StatCategory, StatsError,
};

use super::common::{build_app, wait_until_idle, DELIVERY_TIMEOUT};
use super::render::{render_leaders, render_status};

/// Handle the leaders command
pub fn handle_leaders(
    settings: &Settings,
    args: CommonArgs,
    category: StatCategory,
    limit: Option<usize>,
    team: Option<String>,
) -> Result<()> {
    let mut app = build_app(settings)?
        .with_season(args.season)
        .with_view(View::Leaders(category))
        .with_leaders_limit(limit);

    app.request_leaders(category);
    wait_until_idle(&mut app, DELIVERY_TIMEOUT)?;

    let state = app.state();
    eprintln!("{}", render_status(state));

    let players = match &team {
        Some(abbr) => players_by_team(state.leaders_for(category), abbr),
        None => state.leaders_for(category).to_vec(),
    };
    if players.is_empty() {
        return Err(StatsError::NoData);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&players)?); // tarpaulin::skip
    } else {
        print!("{}", render_leaders(category, &players)); // tarpaulin::skip
    }
    Ok(())
}
