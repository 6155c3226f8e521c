//! Composite record builder.
//!
//! Turns a standings entry or a leaderboard stub into one denormalized record
//! by walking its `$ref` chain. Identity fields (team, division, athlete,
//! required numeric stats) are load-bearing: if one cannot be obtained the
//! record is skipped. Enrichment fields (team of a leader, college, date of
//! birth, venue, logo) degrade to placeholders instead.

use chrono::NaiveDateTime;
use tracing::warn;

use super::http::{resolve_as, Resolver};
use super::types::{
    stat_value, AthleteDocument, CollegeDocument, GroupDocument, Leader, StandingEntry, Stat,
    TeamDocument, TeamRecord, PlayerRecord,
};
use crate::{Result, StatsError};
use std::time::Duration;


pub const FREE_AGENT: &str = "Free Agent";
pub const FREE_AGENT_ABBR: &str = "FA";
pub const UNKNOWN_POSITION: &str = "N/A";

/// `dateOfBirth` as published, e.g. `1995-09-17T07:00Z`.
pub const DOB_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%MZ";
pub const DOB_OUTPUT_FORMAT: &str = "%d-%m-%Y";

/// Reformat an API date of birth; anything unparseable yields `None`.
pub fn format_date_of_birth(raw: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(raw.trim(), DOB_INPUT_FORMAT)
        .ok()
        .map(|dt| dt.format(DOB_OUTPUT_FORMAT).to_string())
}

/// Trailing id of a resource URL: `.../athletes/3139477?lang=en` -> `3139477`.
pub fn id_from_ref(href: &str) -> Option<String> {
    let path = href.split(['?', '#']).next()?;
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

fn required_stat(stats: &[Stat], name: &str, entity: &str) -> Result<f64> {
    stat_value(stats, name).ok_or_else(|| StatsError::missing_field(entity, name))
}

/// A required game count: a whole, non-negative number that fits `u32`.
fn required_count(stats: &[Stat], name: &str, entity: &str) -> Result<u32> {
    let value = required_stat(stats, name, entity)?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        warn!(entity, stat = name, value, "Rejecting non-integral or negative count");
        return Err(StatsError::missing_field(entity, name));
    }
    Ok(value as u32)
}

/// Points are rounded to the nearest whole point. Non-finite or out of range
/// values read as absent.
fn optional_points(stats: &[Stat], name: &str) -> Option<i64> {
    stat_value(stats, name)
        .filter(|v| v.is_finite() && v.abs() < i64::MAX as f64)
        .map(|v| v.round() as i64)
}

/// Build one standings row for `conference`.
///
/// Fails when any of wins/losses/ties/winPercent is missing, or when the team
/// or its division cannot be resolved.
pub async fn build_team_record(
    resolver: &dyn Resolver,
    entry: &StandingEntry,
    conference: &str,
    timeout: Duration,
) -> Result<TeamRecord> {
    let entity = format!("standings entry {}", entry.team.href);
    let overall: &[Stat] = entry
        .records
        .first()
        .map(|r| r.stats.as_slice())
        .unwrap_or(&[]);

    let wins = required_count(overall, "wins", &entity)?;
    let losses = required_count(overall, "losses", &entity)?;
    let ties = required_count(overall, "ties", &entity)?;
    let win_percent = required_stat(overall, "winPercent", &entity)?;
    if !win_percent.is_finite() {
        return Err(StatsError::missing_field(&entity, "winPercent"));
    }

    let team: TeamDocument = resolve_as(resolver, &entry.team.href, timeout).await?;
    let name = team
        .display_name
        .clone()
        .ok_or_else(|| StatsError::missing_field(&entity, "displayName"))?;
    let abbreviation = team
        .abbreviation
        .clone()
        .ok_or_else(|| StatsError::missing_field(&entity, "abbreviation"))?;

    let groups = team
        .groups
        .as_ref()
        .ok_or_else(|| StatsError::missing_field(&entity, "groups"))?;
    let group: GroupDocument = resolve_as(resolver, &groups.href, timeout).await?;

    let summary = |idx: usize| entry.records.get(idx).and_then(|r| r.summary.clone());
    let venue = team.venue.as_ref();

    Ok(TeamRecord {
        team_id: team.id.clone().or_else(|| id_from_ref(&entry.team.href)),
        conference: conference.to_string(),
        division: group.name,
        name,
        abbreviation,
        wins,
        losses,
        ties,
        win_percent,
        points_for: optional_points(overall, "pointsFor"),
        points_against: optional_points(overall, "pointsAgainst"),
        point_differential: optional_points(overall, "pointDifferential"),
        home_record: summary(1),
        away_record: summary(2),
        venue: venue.and_then(|v| v.full_name.clone()),
        address: venue.and_then(|v| v.address.clone()),
        logo: team.logos.first().map(|l| l.href.clone()),
    })
}

/// Build one leaderboard row. The returned record has `rank == 0`; ranks are
/// assigned by the leaders aggregator once the surviving order is known.
///
/// Only the athlete hop is load-bearing. Team and college are fetched
/// concurrently and degrade independently.
pub async fn build_player_record(
    resolver: &dyn Resolver,
    leader: &Leader,
    timeout: Duration,
) -> Result<PlayerRecord> {
    let athlete: AthleteDocument = resolve_as(resolver, &leader.athlete.href, timeout).await?;
    let entity = format!("athlete {}", leader.athlete.href);

    let name = athlete
        .display_name
        .clone()
        .ok_or_else(|| StatsError::missing_field(&entity, "displayName"))?;
    let athlete_id = athlete
        .id
        .clone()
        .or_else(|| id_from_ref(&leader.athlete.href))
        .ok_or_else(|| StatsError::missing_field(&entity, "id"))?;

    let team_ref = leader.team.as_ref().or(athlete.team.as_ref());
    let team_fut = async {
        match team_ref {
            Some(r) => resolve_as::<TeamDocument>(resolver, &r.href, timeout)
                .await
                .map(Some),
            None => Ok(None),
        }
    };
    let college_fut = async {
        match athlete.college.as_ref() {
            Some(r) => resolve_as::<CollegeDocument>(resolver, &r.href, timeout)
                .await
                .map(Some),
            None => Ok(None),
        }
    };
    let (team, college) = tokio::join!(team_fut, college_fut);

    let (team_name, team_abbr) = match team {
        Ok(Some(t)) => (
            t.display_name.unwrap_or_else(|| FREE_AGENT.to_string()),
            t.abbreviation.unwrap_or_else(|| FREE_AGENT_ABBR.to_string()),
        ),
        Ok(None) => (FREE_AGENT.to_string(), FREE_AGENT_ABBR.to_string()),
        Err(e) => {
            warn!(athlete = %name, error = %e, "Team lookup failed, listing as free agent");
            (FREE_AGENT.to_string(), FREE_AGENT_ABBR.to_string())
        }
    };

    let college = match college {
        Ok(c) => c.and_then(|c| c.name.or(c.short_display_name)),
        Err(e) => {
            warn!(athlete = %name, error = %e, "College lookup failed");
            None
        }
    };

    let date_of_birth = athlete.date_of_birth.as_deref().and_then(|raw| {
        let formatted = format_date_of_birth(raw);
        if formatted.is_none() {
            warn!(athlete = %name, raw, "Unrecognized date of birth");
        }
        formatted
    });

    Ok(PlayerRecord {
        rank: 0,
        position: athlete
            .position
            .and_then(|p| p.abbreviation)
            .unwrap_or_else(|| UNKNOWN_POSITION.to_string()),
        team: team_name,
        team_abbr,
        value: leader.value,
        athlete_id,
        headshot: athlete.headshot.map(|h| h.href),
        date_of_birth,
        debut_year: athlete.debut_year,
        college,
        draft: athlete.draft.and_then(|d| d.display_text),
        name,
    })
}
