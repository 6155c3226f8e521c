//! NFL Stats Hub library
//!
//! Fetches NFL standings and statistical leaders from ESPN's core API,
//! caches them with a TTL and stale fallback, and hands results to a
//! single-threaded presentation context through a background I/O bridge.
//!
//! ## Features
//!
//! - **Reference resolution**: follows `$ref` chains (team, division, athlete, college)
//! - **Partial-failure tolerance**: failed records are skipped, failed enrichments degrade
//! - **TTL cache**: fresh hits, single fetch on expiry, stale fallback when a refresh fails
//! - **Concurrency bridge**: background tokio runtime, delivery queue, refresh timer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nfl_stats_hub::{app::App, bridge::Bridge, config::Settings};
//! use nfl_stats_hub::espn::http::HttpResolver;
//! use nfl_stats_hub::service::StatsService;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # fn example() -> nfl_stats_hub::Result<()> {
//! let settings = Settings::load(None)?;
//! let service = StatsService::new(Arc::new(HttpResolver::new()?), settings);
//! let mut app = App::new(Arc::new(service), Bridge::start()?);
//!
//! app.request_standings();
//! while !app.is_idle() {
//!     app.wait_for_delivery(Duration::from_secs(1));
//! }
//! println!("{} teams", app.state().standings.team_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Any setting can be overridden with an `NFL_STATS_` variable:
//! ```bash
//! export NFL_STATS_LEADERS_LIMIT=10
//! ```

pub mod app;
pub mod bridge;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod espn;
pub mod export;
pub mod logging;
pub mod middleware;
pub mod service;

// Re-export commonly used types
pub use cli::types::{Season, StatCategory};
pub use error::{Result, StatsError};
pub use espn::types::{PlayerRecord, Standings, TeamRecord};
