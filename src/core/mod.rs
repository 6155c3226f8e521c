//! Core utilities shared by the service and presentation layers
//!
//! - `cache`: in-memory TTL cache with stale fallback
//! - `filters`: client-side filters over fetched records

pub mod cache;
pub mod filters;

pub use cache::{leaders_key, standings_key, CacheStatus, TtlCache};
pub use filters::{players_by_team, teams_with_min_wins, Filter};
