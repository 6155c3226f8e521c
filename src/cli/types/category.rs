//! Statistical leaderboard categories.

use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Leaderboard categories the hub knows how to display.
///
/// The `Display` form is the identifier ESPN uses for the category in the
/// leaders document (`passingYards`, `sacks`, ...); [`StatCategory::display_name`]
/// is the human label.
///
/// # Examples
///
/// ```rust
/// use nfl_stats_hub::StatCategory;
///
/// let category: StatCategory = "passingYards".parse().unwrap();
/// assert_eq!(category, StatCategory::PassingYards);
/// assert_eq!(category.display_name(), "Passing Yards");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatCategory {
    PassingYards,
    RushingYards,
    ReceivingYards,
    Sacks,
    Interceptions,
    PassingTouchdowns,
    Receptions,
}

impl StatCategory {
    /// All categories, in tab order.
    pub const ALL: [StatCategory; 7] = [
        StatCategory::PassingYards,
        StatCategory::RushingYards,
        StatCategory::ReceivingYards,
        StatCategory::Sacks,
        StatCategory::Interceptions,
        StatCategory::PassingTouchdowns,
        StatCategory::Receptions,
    ];

    /// ESPN category name as it appears in the leaders document.
    pub fn api_name(&self) -> &'static str {
        match self {
            StatCategory::PassingYards => "passingYards",
            StatCategory::RushingYards => "rushingYards",
            StatCategory::ReceivingYards => "receivingYards",
            StatCategory::Sacks => "sacks",
            StatCategory::Interceptions => "interceptions",
            StatCategory::PassingTouchdowns => "passingTouchdowns",
            StatCategory::Receptions => "receptions",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StatCategory::PassingYards => "Passing Yards",
            StatCategory::RushingYards => "Rushing Yards",
            StatCategory::ReceivingYards => "Receiving Yards",
            StatCategory::Sacks => "Sacks",
            StatCategory::Interceptions => "Interceptions",
            StatCategory::PassingTouchdowns => "Passing TDs",
            StatCategory::Receptions => "Receptions",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

impl FromStr for StatCategory {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatCategory::ALL
            .into_iter()
            .find(|c| c.api_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StatsError::InvalidCategory {
                category: s.to_string(),
            })
    }
}
