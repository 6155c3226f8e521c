//! Client-side filters over fetched records.
//!
//! The remote API has no server-side filtering for standings or leaders, so
//! narrowing happens on the snapshot the presentation context already holds.

use crate::espn::types::{PlayerRecord, Standings, TeamRecord};

/// A reusable predicate over records of type `T`.
///
/// # Examples
///
/// ```rust
/// use nfl_stats_hub::core::filters::Filter;
///
/// let even = Filter::new(|n: &u32| n % 2 == 0);
/// assert_eq!(even.apply(&[1, 2, 3, 4]), vec![2, 4]);
/// ```
pub struct Filter<T> {
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: Clone> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }

    /// Matching items, in input order.
    pub fn apply(&self, items: &[T]) -> Vec<T> {
        items.iter().filter(|i| self.matches(i)).cloned().collect()
    }
}

/// Players whose team abbreviation contains `team_abbr`, ignoring case.
pub fn players_by_team(players: &[PlayerRecord], team_abbr: &str) -> Vec<PlayerRecord> {
    let needle = team_abbr.to_lowercase();
    Filter::new(move |p: &PlayerRecord| p.team_abbr.to_lowercase().contains(&needle))
        .apply(players)
}

/// Teams of `division` with at least `min_wins` wins; empty for an unknown division.
pub fn teams_with_min_wins(standings: &Standings, division: &str, min_wins: u32) -> Vec<TeamRecord> {
    Filter::new(move |t: &TeamRecord| t.wins >= min_wins).apply(standings.division(division))
}
