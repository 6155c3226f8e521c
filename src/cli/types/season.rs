//! Season year type.

use crate::error::{Result, StatsError};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for NFL season years.
///
/// The default season is the previous calendar year, which is the most
/// recent season with a complete regular-season record for most of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Season preceding the given calendar year.
    pub fn previous_to(year: i32) -> Self {
        Self(u16::try_from(year - 1).unwrap_or(0))
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::previous_to(chrono::Local::now().year())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}
