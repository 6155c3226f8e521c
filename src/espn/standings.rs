//! Standings aggregator: fetch every conference partition concurrently, build
//! the team rows, then group and order them by division.

use futures::future::join_all;
use std::cmp::Ordering;
use std::time::Duration;
use tracing::{error, info, warn};

use super::http::{resolve_as, Resolver};
use super::records::build_team_record;
use super::types::{decode_entry, StandingEntry, Standings, StandingsDocument, TeamRecord};
use crate::{Result, Season};


/// One standings partition of the league.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conference {
    pub name: &'static str,
    pub group_id: u32,
}

pub const NFC: Conference = Conference {
    name: "NFC",
    group_id: 7,
};

pub const AFC: Conference = Conference {
    name: "AFC",
    group_id: 8,
};

pub const CONFERENCES: [Conference; 2] = [NFC, AFC];

pub fn standings_url(base_url: &str, season: Season, group_id: u32) -> String {
    format!(
        "{}/seasons/{}/types/2/groups/{}/standings/0?lang=en&region=us",
        base_url.trim_end_matches('/'),
        season,
        group_id
    )
}

/// Fetch one conference and build its rows.
///
/// Only a failure of the standings document itself is an error; individual
/// entries that are malformed or cannot be built are logged and left out.
pub async fn fetch_conference(
    resolver: &dyn Resolver,
    base_url: &str,
    season: Season,
    conference: Conference,
    timeout: Duration,
) -> Result<Vec<TeamRecord>> {
    let url = standings_url(base_url, season, conference.group_id);
    let doc: StandingsDocument = resolve_as(resolver, &url, timeout).await?;

    let url = url.as_str();
    let built = join_all(doc.standings.iter().map(|raw| async move {
        let entry: StandingEntry = decode_entry(raw, url)?;
        build_team_record(resolver, &entry, conference.name, timeout).await
    }))
    .await;

    let total = built.len();
    let teams: Vec<TeamRecord> = built
        .into_iter()
        .filter_map(|result| match result {
            Ok(team) => Some(team),
            Err(e) => {
                warn!(conference = conference.name, error = %e, "Skipping team");
                None
            }
        })
        .collect();

    info!(
        conference = conference.name,
        built = teams.len(),
        total,
        "Conference standings fetched"
    );
    Ok(teams)
}

/// Fetch all `conferences` concurrently and merge them.
///
/// A conference that fails entirely contributes nothing; the others are
/// still returned.
pub async fn aggregate_standings(
    resolver: &dyn Resolver,
    base_url: &str,
    season: Season,
    conferences: &[Conference],
    timeout: Duration,
) -> Standings {
    let partitions = join_all(conferences.iter().map(|&conference| async move {
        let result = fetch_conference(resolver, base_url, season, conference, timeout).await;
        (conference, result)
    }))
    .await;

    let mut teams = Vec::new();
    for (conference, result) in partitions {
        match result {
            Ok(records) => teams.extend(records),
            Err(e) => error!(
                conference = conference.name,
                %season,
                error = %e,
                "Conference standings unavailable"
            ),
        }
    }

    group_standings(teams)
}

/// Wins descending, then win percentage descending.
pub fn compare_teams(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| b.win_percent.total_cmp(&a.win_percent))
}

/// Stable sort: exact ties keep their input order.
pub fn sort_teams(teams: &mut [TeamRecord]) {
    teams.sort_by(compare_teams);
}

/// Group rows by division and sort each division for display.
pub fn group_standings(teams: Vec<TeamRecord>) -> Standings {
    let mut standings = Standings::default();
    for team in teams {
        standings
            .divisions
            .entry(team.division.clone())
            .or_default()
            .push(team);
    }
    for division in standings.divisions.values_mut() {
        sort_teams(division);
    }
    standings
}
