//! Watch command: the presentation loop with the refresh timer running.

use std::time::{Duration, Instant};
use tracing::info;

use crate::{
    app::{App, View},
    config::Settings,
    Result, Season, StatCategory,
};

use super::common::build_app;
use super::render::{render_leaders, render_standings, render_status};

/// Longest the loop blocks before checking the timer again.
const MAX_IDLE: Duration = Duration::from_secs(1);

/// Handle the watch command
pub fn handle_watch(
    settings: &Settings,
    season: Season,
    category: Option<StatCategory>,
    updates: Option<u64>,
) -> Result<()> {
    let view = category.map_or(View::Standings, View::Leaders);
    let mut app = build_app(settings)?.with_season(season);

    info!(?view, interval_secs = settings.refresh_interval_secs, "Watching");
    app.set_active_view(view);
    run_loop(&mut app, updates, |app| {
        println!("{}", render_view(app)); // tarpaulin::skip
    });
    Ok(())
}

/// Tick `app` until it has printed `updates` revisions (forever if `None`).
pub fn run_loop(app: &mut App, updates: Option<u64>, mut on_update: impl FnMut(&App)) {
    let mut seen_revision = app.state().revision;
    let mut printed = 0;
    loop {
        let wait = app.until_next_refresh(Instant::now()).min(MAX_IDLE);
        app.wait_for_delivery(wait);
        app.tick(Instant::now());

        if app.state().revision != seen_revision {
            seen_revision = app.state().revision;
            on_update(app);
            printed += 1;
            if updates.is_some_and(|limit| printed >= limit) {
                return;
            }
        }
    }
}

pub fn render_view(app: &App) -> String {
    let state = app.state();
    let body = match state.active_view {
        View::Standings => render_standings(&state.standings),
        View::Leaders(category) => render_leaders(category, state.leaders_for(category)),
    };
    format!("{body}{}", render_status(state))
}
