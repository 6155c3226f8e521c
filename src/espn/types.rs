//! Wire types for ESPN's core v2 API plus the denormalized records built from them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::{Result, StatsError};

#[cfg(test)]
mod tests;

/// A `{"$ref": "..."}` link to another API resource.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RefLink {
    #[serde(rename = "$ref")]
    pub href: String,
}

/// A named numeric statistic.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Stat {
    pub name: String,
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub value: Option<f64>,
}

/// Anything other than a JSON number reads as an absent value.
fn numeric_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// Decode one entry of a list document on its own, so a malformed entry
/// fails alone instead of failing the whole document.
pub fn decode_entry<T: DeserializeOwned>(raw: &Value, source_url: &str) -> Result<T> {
    T::deserialize(raw).map_err(|source| StatsError::Parse {
        url: source_url.to_string(),
        source,
    })
}

/// Look up a stat by name; stats without a numeric value count as missing.
pub fn stat_value(stats: &[Stat], name: &str) -> Option<f64> {
    stats.iter().find(|s| s.name == name).and_then(|s| s.value)
}

/// One record split (overall, home, road) of a standings entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StandingRecord {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

/// A row of a conference standings document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StandingEntry {
    pub team: RefLink,
    #[serde(default)]
    pub records: Vec<StandingRecord>,
}

/// `.../groups/{id}/standings/0`
///
/// Entries stay raw until [`decode_entry`] turns each into a [`StandingEntry`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StandingsDocument {
    #[serde(default)]
    pub standings: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logo {
    pub href: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, rename = "zipCode")]
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Venue {
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// `.../teams/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub logos: Vec<Logo>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub groups: Option<RefLink>,
}

/// `.../groups/{id}` (a division)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupDocument {
    pub name: String,
}

/// `.../seasons/{year}/types/2/leaders`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeadersDocument {
    #[serde(default)]
    pub categories: Vec<LeaderCategory>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeaderCategory {
    pub name: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    /// Raw [`Leader`] stubs.
    #[serde(default)]
    pub leaders: Vec<Value>,
}

/// A leaderboard stub: the statistic plus links to the athlete and team.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Leader {
    pub value: f64,
    #[serde(rename = "displayValue", default)]
    pub display_value: Option<String>,
    pub athlete: RefLink,
    #[serde(default)]
    pub team: Option<RefLink>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PositionRef {
    #[serde(default)]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Headshot {
    pub href: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Draft {
    #[serde(rename = "displayText", default)]
    pub display_text: Option<String>,
}

/// `.../athletes/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AthleteDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub position: Option<PositionRef>,
    #[serde(default)]
    pub team: Option<RefLink>,
    #[serde(default)]
    pub college: Option<RefLink>,
    #[serde(default)]
    pub headshot: Option<Headshot>,
    #[serde(rename = "dateOfBirth", default)]
    pub date_of_birth: Option<String>,
    #[serde(rename = "debutYear", default)]
    pub debut_year: Option<i32>,
    #[serde(default)]
    pub draft: Option<Draft>,
}

/// `.../colleges/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollegeDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "shortDisplayName", default)]
    pub short_display_name: Option<String>,
}

/// One team row of the standings, fully denormalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team_id: Option<String>,
    pub conference: String,
    pub division: String,
    pub name: String,
    pub abbreviation: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// Fraction in `0.0..=1.0`.
    pub win_percent: f64,
    pub points_for: Option<i64>,
    pub points_against: Option<i64>,
    pub point_differential: Option<i64>,
    pub home_record: Option<String>,
    pub away_record: Option<String>,
    pub venue: Option<String>,
    pub address: Option<Address>,
    pub logo: Option<String>,
}

/// One leaderboard row, fully denormalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// 1-based and contiguous within a category.
    pub rank: usize,
    pub name: String,
    pub position: String,
    pub team: String,
    pub team_abbr: String,
    pub value: f64,
    pub athlete_id: String,
    pub headshot: Option<String>,
    /// `DD-MM-YYYY`
    pub date_of_birth: Option<String>,
    pub debut_year: Option<i32>,
    pub college: Option<String>,
    pub draft: Option<String>,
}

pub const CONFERENCE_ORDER: [&str; 2] = ["AFC", "NFC"];
pub const DIVISION_ORDER: [&str; 4] = ["North", "South", "East", "West"];

/// Division name -> teams sorted for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub divisions: BTreeMap<String, Vec<TeamRecord>>,
}

/// One conference block in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConferenceView<'a> {
    pub conference: &'static str,
    pub divisions: Vec<(&'a str, &'a [TeamRecord])>,
}

impl Standings {
    pub fn is_empty(&self) -> bool {
        self.divisions.values().all(Vec::is_empty)
    }

    pub fn team_count(&self) -> usize {
        self.divisions.values().map(Vec::len).sum()
    }

    pub fn division(&self, name: &str) -> &[TeamRecord] {
        self.divisions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Conferences and divisions in canonical display order.
    ///
    /// Divisions outside the canonical list, or with no teams, are omitted;
    /// a conference with no divisions is omitted as well.
    pub fn display_order(&self) -> Vec<ConferenceView<'_>> {
        CONFERENCE_ORDER
            .into_iter()
            .filter_map(|conference| {
                let divisions: Vec<_> = DIVISION_ORDER
                    .iter()
                    .filter_map(|suffix| {
                        let name = format!("{conference} {suffix}");
                        self.divisions
                            .get_key_value(name.as_str())
                            .filter(|(_, teams)| !teams.is_empty())
                            .map(|(k, teams)| (k.as_str(), teams.as_slice()))
                    })
                    .collect();
                (!divisions.is_empty()).then_some(ConferenceView {
                    conference,
                    divisions,
                })
            })
            .collect()
    }
}
