//! Plain-text rendering of the presentation snapshot.

use std::fmt::Write;

use crate::app::ViewState;
use crate::espn::types::{PlayerRecord, Standings, TeamRecord};
use crate::StatCategory;

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn team_line(team: &TeamRecord) -> String {
    format!(
        "  {:<28} {:>3} {:>3} {:>3} {:>6.3} {:>5} {:>5} {:>5}  {:<6} {:<6}",
        team.name,
        team.wins,
        team.losses,
        team.ties,
        team.win_percent,
        or_dash(team.points_for),
        or_dash(team.points_against),
        or_dash(team.point_differential),
        team.home_record.as_deref().unwrap_or("-"),
        team.away_record.as_deref().unwrap_or("-"),
    )
}

/// Conferences and divisions in display order, one table per division.
pub fn render_standings(standings: &Standings) -> String {
    let mut out = String::new();
    for conference in standings.display_order() {
        let _ = writeln!(out, "== {} ==", conference.conference);
        for (division, teams) in conference.divisions {
            let _ = writeln!(
                out,
                "{division}\n  {:<28} {:>3} {:>3} {:>3} {:>6} {:>5} {:>5} {:>5}  {:<6} {:<6}",
                "Team", "W", "L", "T", "PCT", "PF", "PA", "DIFF", "Home", "Away"
            );
            for team in teams {
                let _ = writeln!(out, "{}", team_line(team));
            }
        }
        out.push('\n');
    }
    out
}

pub fn render_leaders(category: StatCategory, players: &[PlayerRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", category.display_name());
    for player in players {
        let _ = writeln!(
            out,
            "{:>3}. {:<26} {:<4} {:<4} {:>8}",
            player.rank, player.name, player.position, player.team_abbr, player.value
        );
    }
    out
}

/// `"{status} | Last updated: {timestamp}"`
pub fn render_status(state: &ViewState) -> String {
    format!(
        "{} | Last updated: {}",
        state.status,
        state.last_updated.as_deref().unwrap_or("never")
    )
}
