//! Export data shape, validation, and the save flow.
//!
//! File writers live behind [`Exporter`]; this module only decides what rows
//! get written, checks them, and asks the presentation context where to put
//! them.

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use crate::bridge::Dispatcher;
use crate::espn::types::{PlayerRecord, Standings};
use crate::{Result, StatCategory, StatsError};

pub const STANDINGS_FILE_STEM: &str = "NFL_Standings";
pub const LEADERS_FILE_STEM: &str = "NFL_Stats";

/// One team with its division made explicit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub conference: String,
    pub division: String,
    pub name: String,
    pub abbreviation: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_percent: f64,
    pub points_for: Option<i64>,
    pub points_against: Option<i64>,
    pub point_differential: Option<i64>,
    pub home_record: Option<String>,
    pub away_record: Option<String>,
}

/// Rows handed to an [`Exporter`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportData {
    Standings(Vec<StandingsRow>),
    Leaders(Vec<PlayerRecord>),
}

impl ExportData {
    pub fn len(&self) -> usize {
        match self {
            ExportData::Standings(rows) => rows.len(),
            ExportData::Leaders(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn default_file_stem(&self) -> &'static str {
        match self {
            ExportData::Standings(_) => STANDINGS_FILE_STEM,
            ExportData::Leaders(_) => LEADERS_FILE_STEM,
        }
    }
}

/// Flatten divisions into rows, in display order.
///
/// The division comes from the grouping key, not from the record.
pub fn flatten_standings(standings: &Standings) -> Vec<StandingsRow> {
    standings
        .display_order()
        .into_iter()
        .flat_map(|conference| conference.divisions)
        .flat_map(|(division, teams)| {
            teams.iter().map(move |team| StandingsRow {
                conference: team.conference.clone(),
                division: division.to_string(),
                name: team.name.clone(),
                abbreviation: team.abbreviation.clone(),
                wins: team.wins,
                losses: team.losses,
                ties: team.ties,
                win_percent: team.win_percent,
                points_for: team.points_for,
                points_against: team.points_against,
                point_differential: team.point_differential,
                home_record: team.home_record.clone(),
                away_record: team.away_record.clone(),
            })
        })
        .collect()
}

fn require(entity: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StatsError::Validation {
            message: format!("{entity} data missing required field '{field}'"),
        });
    }
    Ok(())
}

pub fn validate_standings(rows: &[StandingsRow]) -> Result<()> {
    if rows.is_empty() {
        return Err(StatsError::Validation {
            message: "No standings data to export".to_string(),
        });
    }
    for row in rows {
        require("Team", "conference", &row.conference)?;
        require("Team", "division", &row.division)?;
        require("Team", "name", &row.name)?;
        require("Team", "abbreviation", &row.abbreviation)?;
        if !row.win_percent.is_finite() {
            return Err(StatsError::Validation {
                message: "Team data missing required field 'winPercent'".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_players(category: StatCategory, players: &[PlayerRecord]) -> Result<()> {
    if players.is_empty() {
        return Err(StatsError::Validation {
            message: format!("No data to export for category: {category}"),
        });
    }
    for player in players {
        require("Player", "name", &player.name)?;
        require("Player", "position", &player.position)?;
        require("Player", "team", &player.team)?;
        require("Player", "team_abbr", &player.team_abbr)?;
        if !player.value.is_finite() {
            return Err(StatsError::Validation {
                message: "Player data missing required field 'value'".to_string(),
            });
        }
        if player.rank == 0 {
            return Err(StatsError::Validation {
                message: "Player data missing required field 'rank'".to_string(),
            });
        }
    }
    Ok(())
}

/// Writes export rows to a file.
#[async_trait]
pub trait Exporter: Send + Sync {
    /// File extension without the dot, e.g. `"csv"`.
    fn extension(&self) -> &str;

    async fn save(&self, data: &ExportData, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Cancelled,
}

impl ExportOutcome {
    pub fn status_message(&self) -> String {
        match self {
            ExportOutcome::Saved(path) => format!("Data exported to {}", path.display()),
            ExportOutcome::Cancelled => "Export cancelled".to_string(),
        }
    }
}

/// Ask the presentation context for a filename, then save `data` there.
///
/// `prompt` runs on the presentation context with the suggested file name
/// (`"{stem}.{ext}"`); returning `None` cancels the export.
pub async fn export_with_prompt<S, P>(
    dispatcher: &Dispatcher<S>,
    exporter: Arc<dyn Exporter>,
    data: ExportData,
    prompt: P,
) -> Result<ExportOutcome>
where
    S: 'static,
    P: FnOnce(&mut S, &str) -> Option<PathBuf> + Send + 'static,
{
    let suggested = format!("{}.{}", data.default_file_stem(), exporter.extension());
    let Some(path) = dispatcher.ask(move |state| prompt(state, &suggested)).await? else {
        info!("Export cancelled");
        return Ok(ExportOutcome::Cancelled);
    };

    match exporter.save(&data, &path).await {
        Ok(()) => {
            info!(path = %path.display(), rows = data.len(), "Export finished");
            Ok(ExportOutcome::Saved(path))
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Export failed");
            Err(e)
        }
    }
}
